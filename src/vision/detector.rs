// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detector collaborator interface
//!
//! The HTTP layer hands every upload to a `Detector` and forwards whatever it
//! returns. Swapping the placeholder for a model-backed detector does not touch
//! the endpoint contract.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use super::image_utils::ImageError;
use super::prediction::Prediction;

/// Errors a detector can report
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Invalid image: {0}")]
    InvalidImage(#[from] ImageError),

    #[error("Invalid prediction: {0}")]
    InvalidPrediction(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// A file received over HTTP. Lives only for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Client-supplied filename (may be empty)
    pub filename: String,
    /// Raw uploaded bytes, untouched
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Maps raw image bytes to zero or more predictions.
///
/// Implementations are shared across concurrent requests behind an `Arc`, so
/// `infer` takes `&self`. A detector holding a loaded model is responsible for
/// its own synchronisation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Detector: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Run detection on one upload. Output order is the order detections were produced.
    async fn infer(&self, image: &UploadedImage) -> Result<Vec<Prediction>, DetectorError>;
}
