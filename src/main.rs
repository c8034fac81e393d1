// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use currency_detect_node::{api::start_server, config::ServerConfig, version};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("🚀 Starting {}", version::get_version_string());

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    tracing::info!(
        "Config: listen={}, max_upload={} bytes, detector={}, validate_images={}, cors_origins={:?}, cors_credentials={}",
        config.listen_addr,
        config.max_upload_bytes,
        config.detector.kind,
        config.detector.validate_images,
        config.cors.allowed_origins,
        config.cors.allow_credentials
    );

    if config.cors.allows_any_origin() && config.cors.allow_credentials {
        tracing::warn!(
            "CORS accepts any origin with credentials; set DETECT_CORS_ORIGINS to restrict it"
        );
    }

    start_server(config).await
}
