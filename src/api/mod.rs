// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cors;
pub mod detect;
pub mod errors;
pub mod http_server;
pub mod server;

pub use detect::{detect_handler, DetectResponse};
pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, start_server, AppState};
pub use server::ApiServer;
