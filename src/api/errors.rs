// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::vision::DetectorError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest(String),
    ValidationError { field: String, message: String },
    PayloadTooLarge { limit: usize },
    InvalidImage(String),
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::ValidationError { field, message } => {
                let mut details = HashMap::new();
                details.insert(
                    "field".to_string(),
                    serde_json::Value::String(field.clone()),
                );
                ("validation_error", message.clone(), Some(details))
            }
            ApiError::PayloadTooLarge { limit } => {
                let mut details = HashMap::new();
                details.insert(
                    "limit_bytes".to_string(),
                    serde_json::Value::Number((*limit as u64).into()),
                );
                (
                    "payload_too_large",
                    format!("Upload exceeds the maximum size of {} bytes", limit),
                    Some(details),
                )
            }
            ApiError::InvalidImage(msg) => ("invalid_image", msg.clone(), None),
            ApiError::InternalError(msg) => ("internal_error", msg.clone(), None),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_)
            | ApiError::ValidationError { .. }
            | ApiError::InvalidImage(_) => 400,
            ApiError::PayloadTooLarge { .. } => 413,
            ApiError::InternalError(_) => 500,
        }
    }

    pub fn missing_field(field: &str) -> Self {
        ApiError::ValidationError {
            field: field.to_string(),
            message: format!("{} is required", field),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::PayloadTooLarge { limit } => {
                write!(f, "Payload too large (limit {} bytes)", limit)
            }
            ApiError::InvalidImage(msg) => write!(f, "Invalid image: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DetectorError> for ApiError {
    fn from(err: DetectorError) -> Self {
        match err {
            DetectorError::InvalidImage(e) => ApiError::InvalidImage(e.to_string()),
            DetectorError::InvalidPrediction(msg) => {
                ApiError::InternalError(format!("detector produced an invalid prediction: {}", msg))
            }
            DetectorError::Inference(msg) => {
                ApiError::InternalError(format!("detection failed: {}", msg))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
