// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extraction of the uploaded file from a multipart body

use axum::http::StatusCode;
use axum_extra::extract::multipart::{Multipart, MultipartError};
use tracing::debug;

use crate::api::errors::ApiError;
use crate::vision::UploadedImage;

/// Name of the multipart part carrying the upload
pub const FILE_FIELD: &str = "file";

/// Pull the `file` part out of a multipart body.
///
/// The first part named `file` wins; any other parts are skipped unread.
/// No constraint is placed on the part's content type or filename.
pub async fn read_upload(
    multipart: &mut Multipart,
    body_limit: usize,
) -> Result<UploadedImage, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, body_limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!("Skipping multipart part {:?}", field.name());
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| ApiError::ValidationError {
                field: FILE_FIELD.to_string(),
                message: "expected a file upload, got a plain form field".to_string(),
            })?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, body_limit))?;

        return Ok(UploadedImage::new(filename, bytes));
    }

    Err(ApiError::missing_field(FILE_FIELD))
}

fn multipart_error(err: MultipartError, body_limit: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit: body_limit }
    } else {
        ApiError::InvalidRequest(format!("malformed multipart body: {}", err.body_text()))
    }
}
