// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use std::net::SocketAddr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::http_server::{create_app, AppState};
use crate::config::ServerConfig;

/// Detection API running on a background task
///
/// Binds during `new`, so `local_addr` is valid as soon as construction
/// returns (useful with port 0).
pub struct ApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ApiServer {
    pub async fn new(config: ServerConfig) -> Result<Self> {
        Self::with_state(AppState::from_config(&config), config).await
    }

    /// Start with an explicit state, e.g. a custom detector
    pub async fn with_state(state: AppState, config: ServerConfig) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
        let addr = listener.local_addr()?;
        let app = create_app(state, &config);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let serve_future = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });

            if let Err(e) = serve_future.await {
                warn!("Detection API server exited with error: {}", e);
            }
        });

        info!("Detection API started on {}", addr);

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL clients should use, e.g. `http://127.0.0.1:43121`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
