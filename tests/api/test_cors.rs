// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Cross-origin tests for POST /detect
//!
//! Default policy accepts every origin, method and header and allows
//! credentials. Cookieless actual requests get the literal `*` origin;
//! preflights and cookie-bearing requests get their origin echoed back.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use currency_detect_node::config::{CorsConfig, ServerConfig};
use tower::util::ServiceExt;

use super::common::{app, app_with_config, detect_request, PartSpec};

const ORIGIN: &str = "https://kasir.example.id";

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/detect")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-custom")
        .body(Body::empty())
        .unwrap()
}

fn header_str<'a>(response: &'a axum::response::Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn test_preflight_accepts_any_origin_with_credentials() {
    let response = app().oneshot(preflight(ORIGIN)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(ORIGIN)
    );
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some("true")
    );
    let methods = header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS).unwrap();
    assert!(methods.contains("POST"));
    let headers = header_str(&response, header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap();
    assert!(headers.contains("x-custom"));
}

#[tokio::test]
async fn test_actual_request_carries_wildcard_origin() {
    let mut request = detect_request(&[PartSpec::file("20k.jpg", b"x")]);
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://localhost:5173".parse().unwrap());

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*")
    );
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some("true")
    );
}

#[tokio::test]
async fn test_cookie_bearing_request_echoes_origin() {
    let mut request = detect_request(&[PartSpec::file("20k.jpg", b"x")]);
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://evil.test".parse().unwrap());
    request
        .headers_mut()
        .insert(header::COOKIE, "session=abc".parse().unwrap());

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("http://evil.test")
    );
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some("true")
    );
}

#[tokio::test]
async fn test_wildcard_origin_without_credentials() {
    let config = ServerConfig {
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: false,
        },
        ..Default::default()
    };

    let response = app_with_config(config.clone())
        .oneshot(preflight(ORIGIN))
        .await
        .unwrap();
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*")
    );

    let mut request = detect_request(&[PartSpec::file("frame.jpg", b"x")]);
    request
        .headers_mut()
        .insert(header::ORIGIN, ORIGIN.parse().unwrap());
    let response = app_with_config(config).oneshot(request).await.unwrap();
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("*")
    );
}

#[tokio::test]
async fn test_restricted_origin_list() {
    let config = ServerConfig {
        cors: CorsConfig {
            allowed_origins: vec!["http://allowed.test".to_string()],
            allow_credentials: true,
        },
        ..Default::default()
    };

    let allowed = app_with_config(config.clone())
        .oneshot(preflight("http://allowed.test"))
        .await
        .unwrap();
    assert_eq!(
        header_str(&allowed, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("http://allowed.test")
    );

    let denied = app_with_config(config)
        .oneshot(preflight("http://other.test"))
        .await
        .unwrap();
    assert!(denied
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
