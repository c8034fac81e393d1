// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection API endpoint module
//!
//! Provides POST /detect for running the configured detector on an uploaded file.

pub mod handler;
pub mod response;
pub mod upload;

pub use handler::detect_handler;
pub use response::DetectResponse;
pub use upload::{read_upload, FILE_FIELD};
