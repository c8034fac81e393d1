// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wildcard origin for the open credentials policy
//!
//! With `allowed_origins = ["*"]` and credentials enabled, the CORS layer has
//! to mirror the request origin. Requests that carry no cookie get the literal
//! `*` instead, the way browsers and existing web clients expect from this API.
//! Preflights and cookie-bearing requests keep the mirrored origin.

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};

fn is_preflight(request: &Request) -> bool {
    request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Replace a mirrored `Access-Control-Allow-Origin` with `*` on cookieless
/// actual requests
pub async fn wildcard_origin_without_cookie(request: Request, next: Next) -> Response {
    let keep_mirrored = is_preflight(&request) || request.headers().contains_key(header::COOKIE);

    let mut response = next.run(request).await;

    if !keep_mirrored
        && response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    {
        response.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
    }

    response
}
