// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detector selection and construction

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::detector::Detector;
use super::image_utils::MAX_IMAGE_SIZE;
use super::stub::FilenameStubDetector;
use super::validating::ValidatingDetector;

/// Which detector implementation serves `/detect`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorKind {
    /// Filename-keyed placeholder
    #[default]
    Stub,
}

impl FromStr for DetectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stub" | "filename-stub" => Ok(DetectorKind::Stub),
            other => Err(format!("unknown detector '{}', supported: [\"stub\"]", other)),
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorKind::Stub => write!(f, "stub"),
        }
    }
}

/// Configuration for building the detector
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub kind: DetectorKind,
    /// Decode uploads and reject non-images before detection
    pub validate_images: bool,
    /// Largest upload the image decoder will accept
    pub max_image_bytes: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            kind: DetectorKind::Stub,
            validate_images: false,
            max_image_bytes: MAX_IMAGE_SIZE,
        }
    }
}

/// Build the detector described by `config`
pub fn build_detector(config: &DetectorConfig) -> Arc<dyn Detector> {
    let detector: Arc<dyn Detector> = match (config.kind, config.validate_images) {
        (DetectorKind::Stub, false) => Arc::new(FilenameStubDetector::new()),
        (DetectorKind::Stub, true) => Arc::new(ValidatingDetector::new(
            FilenameStubDetector::new(),
            config.max_image_bytes,
        )),
    };

    tracing::info!(
        "✅ Detector ready: {} (image validation {})",
        detector.name(),
        if config.validate_images { "on" } else { "off" }
    );

    detector
}
