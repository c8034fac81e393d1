// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Filename-keyed placeholder detector
//!
//! Web clients were built against this behaviour, so it stays the default:
//! any upload whose filename contains `20k` yields a single Rp 20.000 hit,
//! everything else yields nothing. The bytes are never inspected.

use async_trait::async_trait;
use tracing::debug;

use super::detector::{Detector, DetectorError, UploadedImage};
use super::prediction::{BoundingBox, Prediction};

const MARKER: &str = "20k";
const STUB_CLASS_ID: u32 = 4;
const STUB_CONFIDENCE: f32 = 0.88;
const STUB_BOX: [f32; 4] = [10.0, 10.0, 200.0, 100.0];

#[derive(Debug, Clone, Default)]
pub struct FilenameStubDetector;

impl FilenameStubDetector {
    pub fn new() -> Self {
        Self
    }

    /// The prediction returned for matching filenames
    pub fn canned_prediction() -> Prediction {
        Prediction {
            class_id: STUB_CLASS_ID,
            confidence: STUB_CONFIDENCE,
            bbox: BoundingBox(STUB_BOX),
        }
    }
}

#[async_trait]
impl Detector for FilenameStubDetector {
    fn name(&self) -> &'static str {
        "filename-stub"
    }

    async fn infer(&self, image: &UploadedImage) -> Result<Vec<Prediction>, DetectorError> {
        let hit = image.filename.contains(MARKER);
        debug!(filename = %image.filename, hit, "stub detector evaluated filename");

        if hit {
            Ok(vec![Self::canned_prediction()])
        } else {
            Ok(Vec::new())
        }
    }
}
