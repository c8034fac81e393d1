// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::DefaultBodyLimit, middleware, routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::cors::wildcard_origin_without_cookie;
use super::detect::detect_handler;
use crate::config::ServerConfig;
use crate::vision::{build_detector, Detector};

/// Shared state handed to every request
///
/// Holds nothing mutable: the detector is shared read-only and each request
/// owns its upload.
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<dyn Detector>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(detector: Arc<dyn Detector>, max_upload_bytes: usize) -> Self {
        Self {
            detector,
            max_upload_bytes,
        }
    }

    /// Build state from configuration, constructing the configured detector
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(build_detector(&config.detector), config.max_upload_bytes)
    }

    pub fn new_for_test() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

/// Build the router: `POST /detect` plus body limit, tracing and CORS layers
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/detect", post(detect_handler))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(config.cors.layer());

    if config.cors.allows_any_origin() && config.cors.allow_credentials {
        router = router.layer(middleware::from_fn(wildcard_origin_without_cookie));
    }

    router.with_state(state)
}

/// Bind `config.listen_addr` and serve until ctrl-c
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let app = create_app(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("🚀 Detection API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Detection API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
