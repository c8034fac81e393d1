// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection endpoint handler

use std::time::Instant;

use axum::{extract::State, Json};
use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use tracing::{debug, info, warn};

use super::response::DetectResponse;
use super::upload::read_upload;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /detect - Run the configured detector on an uploaded file
///
/// # Request
/// - `multipart/form-data` with one file part named `file` (required)
///
/// # Response
/// - `predictions`: detections in the order the detector produced them
///   (`class_`, `confidence`, `box`); an empty list is a normal result
///
/// # Errors
/// - 400 Bad Request: missing `file` part, malformed multipart body, or an
///   upload the detector refused to decode
/// - 413 Payload Too Large: body exceeds the configured upload limit
/// - 500 Internal Server Error: detector failure
pub async fn detect_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DetectResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!("Rejected /detect request: {}", rejection);
        ApiError::InvalidRequest(rejection.to_string())
    })?;

    let upload = read_upload(&mut multipart, state.max_upload_bytes)
        .await
        .map_err(|e| {
            warn!("Detect validation failed: {}", e);
            e
        })?;

    debug!(
        "Upload received: filename={:?}, {} bytes",
        upload.filename,
        upload.len()
    );

    let started = Instant::now();
    let predictions = state.detector.infer(&upload).await.map_err(|e| {
        warn!(
            "Detector {} failed on {:?}: {}",
            state.detector.name(),
            upload.filename,
            e
        );
        ApiError::from(e)
    })?;

    info!(
        "Detection complete: {} predictions, {}ms (detector: {})",
        predictions.len(),
        started.elapsed().as_millis(),
        state.detector.name()
    );

    Ok(Json(DetectResponse::new(predictions)))
}
