// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction value types returned by detectors

use serde::{Deserialize, Serialize};

use super::detector::DetectorError;

/// Axis-aligned box in pixel coordinates: `[x_min, y_min, x_max, y_max]`
///
/// Serialized as a plain 4-element JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundingBox(pub [f32; 4]);

impl BoundingBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self([x_min, y_min, x_max, y_max])
    }

    pub fn x_min(&self) -> f32 {
        self.0[0]
    }

    pub fn y_min(&self) -> f32 {
        self.0[1]
    }

    pub fn x_max(&self) -> f32 {
        self.0[2]
    }

    pub fn y_max(&self) -> f32 {
        self.0[3]
    }

    pub fn width(&self) -> f32 {
        self.x_max() - self.x_min()
    }

    pub fn height(&self) -> f32 {
        self.y_max() - self.y_min()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(coords: [f32; 4]) -> Self {
        Self(coords)
    }
}

/// One detected object
///
/// Field names on the wire are `class_`, `confidence` and `box`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "class_")]
    pub class_id: u32,
    /// Confidence score (0.0-1.0)
    pub confidence: f32,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
}

impl Prediction {
    /// Build a prediction, rejecting out-of-range confidences and non-finite boxes
    pub fn new(
        class_id: u32,
        confidence: f32,
        bbox: impl Into<BoundingBox>,
    ) -> Result<Self, DetectorError> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(DetectorError::InvalidPrediction(format!(
                "confidence {} for class {} is outside [0, 1]",
                confidence, class_id
            )));
        }

        let bbox = bbox.into();
        if !bbox.is_finite() {
            return Err(DetectorError::InvalidPrediction(format!(
                "bounding box {:?} for class {} has non-finite coordinates",
                bbox.0, class_id
            )));
        }

        Ok(Self {
            class_id,
            confidence,
            bbox,
        })
    }

    /// Re-check a prediction that may have been built without `new`
    pub fn validate(&self) -> Result<(), DetectorError> {
        Self::new(self.class_id, self.confidence, self.bbox).map(|_| ())
    }
}
