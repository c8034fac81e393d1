// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration and environment loading

use axum::http::HeaderValue;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::vision::image_utils::MAX_IMAGE_SIZE;
use crate::vision::{DetectorConfig, DetectorKind};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

fn invalid(key: &str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Cross-origin policy for the API
///
/// `allowed_origins == ["*"]` accepts every origin. Combined with
/// `allow_credentials`, this layer echoes the request's own origin, method and
/// headers; `api::cors` then restores `*` on cookieless actual requests.
#[derive(Debug, Clone, PartialEq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }

    pub fn layer(&self) -> CorsLayer {
        if self.allows_any_origin() {
            if self.allow_credentials {
                return CorsLayer::very_permissive();
            }
            return CorsLayer::permissive();
        }

        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|o| HeaderValue::from_str(o).ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(self.allow_credentials)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
    pub cors: CorsConfig,
    pub detector: DetectorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            max_upload_bytes: MAX_IMAGE_SIZE,
            cors: CorsConfig::default(),
            detector: DetectorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables
    ///
    /// - `DETECT_LISTEN_ADDR` (full socket address) or `API_PORT` (binds 0.0.0.0)
    /// - `DETECT_MAX_UPLOAD_BYTES`
    /// - `DETECT_CORS_ORIGINS` (`*` or comma separated origins)
    /// - `DETECT_CORS_ALLOW_CREDENTIALS` (true/false)
    /// - `DETECT_DETECTOR` (`stub`)
    /// - `DETECT_VALIDATE_IMAGES` (true/false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("DETECT_LISTEN_ADDR") {
            config.listen_addr = addr.trim().to_string();
        } else if let Some(port) = lookup("API_PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| invalid("API_PORT", &port, "expected a port number"))?;
            config.listen_addr = format!("0.0.0.0:{}", port);
        }

        if let Some(limit) = lookup("DETECT_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = match limit.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(invalid(
                        "DETECT_MAX_UPLOAD_BYTES",
                        &limit,
                        "expected a positive byte count",
                    ))
                }
            };
        }
        config.detector.max_image_bytes = config.max_upload_bytes;

        if let Some(origins) = lookup("DETECT_CORS_ORIGINS") {
            config.cors.allowed_origins = parse_origins(&origins)?;
        }

        if let Some(flag) = lookup("DETECT_CORS_ALLOW_CREDENTIALS") {
            config.cors.allow_credentials = parse_bool("DETECT_CORS_ALLOW_CREDENTIALS", &flag)?;
        }

        if let Some(kind) = lookup("DETECT_DETECTOR") {
            config.detector.kind = kind
                .parse::<DetectorKind>()
                .map_err(|reason| invalid("DETECT_DETECTOR", &kind, reason))?;
        }

        if let Some(flag) = lookup("DETECT_VALIDATE_IMAGES") {
            config.detector.validate_images = parse_bool("DETECT_VALIDATE_IMAGES", &flag)?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

fn parse_origins(value: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        return Err(invalid("DETECT_CORS_ORIGINS", value, "no origins given"));
    }

    for origin in &origins {
        if origin != "*" && HeaderValue::from_str(origin).is_err() {
            return Err(invalid(
                "DETECT_CORS_ORIGINS",
                origin,
                "not a valid header value",
            ));
        }
    }

    Ok(origins)
}
