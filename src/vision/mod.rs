// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection domain: predictions, the detector interface and its implementations
//!
//! This module provides:
//! - `Prediction` / `BoundingBox` value types
//! - the `Detector` trait the HTTP layer delegates to
//! - the filename-keyed placeholder detector and an image-validating wrapper

pub mod detector;
pub mod image_utils;
pub mod model_manager;
pub mod prediction;
pub mod stub;
pub mod validating;

pub use detector::{Detector, DetectorError, UploadedImage};
pub use image_utils::{decode_image_bytes, detect_format, ImageError, ImageInfo};
pub use model_manager::{build_detector, DetectorConfig, DetectorKind};
pub use prediction::{BoundingBox, Prediction};
pub use stub::FilenameStubDetector;
pub use validating::ValidatingDetector;
