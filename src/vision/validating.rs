// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detector wrapper that refuses uploads which are not decodable images

use async_trait::async_trait;
use tracing::{debug, warn};

use super::detector::{Detector, DetectorError, UploadedImage};
use super::image_utils::decode_image_bytes;
use super::prediction::Prediction;

/// Decodes every upload before handing it to the inner detector, and checks
/// every prediction the inner detector returns.
pub struct ValidatingDetector<D> {
    inner: D,
    max_bytes: usize,
}

impl<D: Detector> ValidatingDetector<D> {
    pub fn new(inner: D, max_bytes: usize) -> Self {
        Self { inner, max_bytes }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

#[async_trait]
impl<D: Detector> Detector for ValidatingDetector<D> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn infer(&self, image: &UploadedImage) -> Result<Vec<Prediction>, DetectorError> {
        let (_decoded, info) = decode_image_bytes(&image.bytes, self.max_bytes).map_err(|e| {
            warn!(filename = %image.filename, "rejecting upload: {}", e);
            DetectorError::from(e)
        })?;

        debug!(
            "Decoded upload {}: {}x{} {:?}, {} bytes",
            image.filename, info.width, info.height, info.format, info.size_bytes
        );

        let predictions = self.inner.infer(image).await?;
        for prediction in &predictions {
            prediction.validate()?;
        }

        Ok(predictions)
    }
}
