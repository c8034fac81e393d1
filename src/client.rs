// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for the `/detect` endpoint

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::debug;

use crate::api::detect::{DetectResponse, FILE_FIELD};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct DetectClient {
    http: reqwest::Client,
    base_url: String,
}

impl DetectClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload `bytes` under `filename` and return the server's predictions
    pub async fn detect_bytes(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<DetectResponse, ClientError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")?;
        let form = Form::new().part(FILE_FIELD, part);

        let url = format!("{}/detect", self.base_url);
        debug!("POST {} ({})", url, filename);

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<DetectResponse>().await?)
    }

    /// Read a file from disk and upload it, keeping its file name
    pub async fn detect_file(&self, path: impl AsRef<Path>) -> Result<DetectResponse, ClientError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.detect_bytes(&filename, bytes).await
    }
}

const UNREADABLE_BODY: &str = "<response body could not be read>";

async fn read_error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Failed to read error response body: {}", e);
            UNREADABLE_BODY.to_string()
        }
    }
}
