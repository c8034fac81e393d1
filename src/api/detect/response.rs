// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection response envelope

use serde::{Deserialize, Serialize};

use crate::vision::Prediction;

/// Response from `POST /detect`
///
/// `predictions` keeps the order the detector produced and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    pub predictions: Vec<Prediction>,
}

impl DetectResponse {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self { predictions }
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}
