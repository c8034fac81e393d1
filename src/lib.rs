// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod currency;
pub mod tally;
pub mod version;
pub mod vision;

pub use api::{create_app, AppState, ApiServer, DetectResponse};
pub use client::DetectClient;
pub use config::ServerConfig;
pub use vision::{Detector, FilenameStubDetector, Prediction};
