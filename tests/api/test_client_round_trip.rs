// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Client <-> server tests over a real socket
//!
//! Starts the API on an ephemeral port and drives it with `DetectClient`,
//! mirroring how the web front end uploads camera frames.

use currency_detect_node::{
    api::ApiServer,
    client::{ClientError, DetectClient},
    config::ServerConfig,
    currency::nominal_for_class,
    tally::MoneyTally,
};

fn ephemeral_config() -> ServerConfig {
    ServerConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_client_uploads_frame() {
    let server = ApiServer::new(ephemeral_config()).await.unwrap();
    let client = DetectClient::new(server.base_url()).unwrap();

    let response = client
        .detect_bytes("20k_frame.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
        .await
        .unwrap();
    assert_eq!(response.predictions.len(), 1);
    assert_eq!(nominal_for_class(response.predictions[0].class_id), 20_000);

    let response = client
        .detect_bytes("frame.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
        .await
        .unwrap();
    assert!(response.predictions.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_client_uploads_file_from_disk() {
    let server = ApiServer::new(ephemeral_config()).await.unwrap();
    let client = DetectClient::new(server.base_url()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let marked = dir.path().join("20k_note.png");
    let plain = dir.path().join("note.png");
    std::fs::write(&marked, b"pretend png").unwrap();
    std::fs::write(&plain, b"pretend png").unwrap();

    let mut tally = MoneyTally::new();
    for path in [&marked, &marked, &plain] {
        let response = client.detect_file(path).await.unwrap();
        tally.record(&response.predictions);
    }
    assert_eq!(tally.total(), 40_000);
    assert_eq!(tally.entries()[0].count, 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_client_reports_http_errors() {
    let config = ServerConfig {
        max_upload_bytes: 512,
        ..ephemeral_config()
    };
    let server = ApiServer::new(config).await.unwrap();
    let client = DetectClient::new(server.base_url()).unwrap();

    let err = client
        .detect_bytes("20k.jpg", vec![1u8; 4 * 1024])
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, .. } => assert_eq!(status, 413),
        other => panic!("expected status error, got {:?}", other),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_client_missing_file_is_io_error() {
    let client = DetectClient::new("http://127.0.0.1:9").unwrap();
    let err = client
        .detect_file("/definitely/not/here/20k.jpg")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Io(_)));
}
