// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Detector substitution tests
//!
//! A detector defined outside the crate can stand in for the placeholder
//! without changing what callers of /detect see.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use currency_detect_node::{
    api::{create_app, AppState, DetectResponse},
    config::ServerConfig,
    vision::{
        Detector, DetectorError, FilenameStubDetector, Prediction, UploadedImage,
        ValidatingDetector,
    },
};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::util::ServiceExt;

const BOUNDARY: &str = "vision-test-boundary";

/// Reports one prediction per 100 bytes of upload
struct SizeDetector {
    calls: AtomicUsize,
}

#[async_trait]
impl Detector for SizeDetector {
    fn name(&self) -> &'static str {
        "size"
    }

    async fn infer(&self, image: &UploadedImage) -> Result<Vec<Prediction>, DetectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (0..image.len() / 100)
            .map(|i| {
                let offset = i as f32 * 10.0;
                Prediction::new(i as u32, 0.5, [offset, offset, offset + 5.0, offset + 5.0])
            })
            .collect()
    }
}

fn upload(filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/detect")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn detect(app: axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

#[tokio::test]
async fn test_custom_detector_output_is_forwarded_unmodified() {
    let detector = Arc::new(SizeDetector {
        calls: AtomicUsize::new(0),
    });
    let config = ServerConfig::default();
    let app = create_app(
        AppState::new(detector.clone(), config.max_upload_bytes),
        &config,
    );

    let (status, body) = detect(app, upload("20k.jpg", &[0u8; 350])).await;
    assert_eq!(status, StatusCode::OK);

    let response: DetectResponse = serde_json::from_slice(&body).unwrap();
    let classes: Vec<u32> = response.predictions.iter().map(|p| p.class_id).collect();
    assert_eq!(classes, vec![0, 1, 2]);
    assert_eq!(response.predictions[2].bbox.x_min(), 20.0);
    assert_eq!(detector.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_custom_detector_empty_result_is_success() {
    let detector = Arc::new(SizeDetector {
        calls: AtomicUsize::new(0),
    });
    let config = ServerConfig::default();
    let app = create_app(AppState::new(detector, config.max_upload_bytes), &config);

    let (status, body) = detect(app, upload("20k.jpg", b"tiny")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, br#"{"predictions":[]}"#.to_vec());
}

#[tokio::test]
async fn test_validating_detector_accepts_real_png() {
    let detector = Arc::new(ValidatingDetector::new(
        FilenameStubDetector::new(),
        1024 * 1024,
    ));
    let config = ServerConfig::default();
    let app = create_app(AppState::new(detector, config.max_upload_bytes), &config);

    let (status, body) = detect(app.clone(), upload("20k_note.png", &png(8, 4))).await;
    assert_eq!(status, StatusCode::OK);
    let response: DetectResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.predictions.len(), 1);

    let (status, body) = detect(app, upload("20k_note.png", b"GIF89a-but-not-really")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error_type"], "invalid_image");
}
