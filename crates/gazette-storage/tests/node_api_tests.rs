//! Integration tests for the write-side node client against wiremock.
//!
//! Verify request construction (batch header, query params, JSON bodies),
//! response parsing, and error mapping without a live node.

use ed25519_dalek::SigningKey;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gazette_core::BatchId;
use gazette_storage::{ManifestEntry, NodeClient, NodeConfig, PointerAddress, StorageError};

const HASH: &str = "1a2b3c4d5e6f70811a2b3c4d5e6f70811a2b3c4d5e6f70811a2b3c4d5e6f7081";

fn client(server: &MockServer) -> NodeClient {
    NodeClient::new(&NodeConfig::new(server.uri())).expect("client build")
}

fn batch() -> BatchId {
    BatchId::new(&"f".repeat(64)).unwrap()
}

#[tokio::test]
async fn list_batches_parses_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"batch_id": "a".repeat(64), "usable": true, "remaining_capacity": 10},
            {"batch_id": "b".repeat(64), "usable": false, "remaining_capacity": 100},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let batches = client(&server).list_batches().await.expect("list");
    assert_eq!(batches.len(), 2);
    assert!(batches[0].usable);
    assert_eq!(batches[1].remaining_capacity, 100);
}

#[tokio::test]
async fn upload_bytes_sends_batch_header_and_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resources"))
        .and(query_param("name", "banner.png"))
        .and(header("x-postage-batch", "f".repeat(64).as_str()))
        .and(header("content-type", "image/png"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"reference": HASH})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reference = client(&server)
        .upload_bytes(&batch(), "banner.png", "image/png", vec![1, 2, 3])
        .await
        .expect("upload");
    assert_eq!(reference.as_str(), HASH);
}

#[tokio::test]
async fn upload_bytes_maps_non_2xx_to_api_error_with_context() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(402).set_body_string("batch exhausted"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .upload_bytes(&batch(), "a.txt", "text/plain", vec![0])
        .await
        .expect_err("must fail");
    match err {
        StorageError::Api {
            context,
            status,
            body,
            ..
        } => {
            assert_eq!(context, "upload-failed");
            assert_eq!(status, 402);
            assert!(body.contains("batch exhausted"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn api_error_excerpt_truncates_on_char_boundary() {
    let server = MockServer::start().await;

    // A multibyte char straddles the 256-byte excerpt limit; truncation
    // must back off to a char boundary instead of panicking.
    let body = format!("{}é", "a".repeat(255));
    Mock::given(method("POST"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .upload_bytes(&batch(), "a.txt", "text/plain", vec![0])
        .await
        .expect_err("must fail");
    match err {
        StorageError::Api { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "a".repeat(255));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_manifest_hex_encodes_entries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/manifests"))
        .and(header("x-postage-batch", "f".repeat(64).as_str()))
        .and(wiremock::matchers::body_partial_json(serde_json::json!({
            "entries": [
                {"path": "index.html", "content_type": "text/html", "data": hex::encode(b"<html/>")},
            ]
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"reference": HASH})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let entries = vec![ManifestEntry {
        path: "index.html".to_string(),
        content_type: "text/html".to_string(),
        data: b"<html/>".to_vec(),
    }];
    let reference = client(&server)
        .upload_manifest(&batch(), &entries)
        .await
        .expect("manifest upload");
    assert_eq!(reference.as_str(), HASH);
}

#[tokio::test]
async fn publish_pointer_targets_key_derived_address() {
    let server = MockServer::start().await;

    let key = SigningKey::from_bytes(&[3u8; 32]);
    let expected = PointerAddress::from_verifying_key(&key.verifying_key());

    Mock::given(method("POST"))
        .and(path(format!("/pointers/{}", expected.as_str())))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            serde_json::json!({"address": expected.as_str()}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let address = client(&server)
        .publish_pointer(&key, &gazette_core::StorageRef::normalize(HASH))
        .await
        .expect("publish");
    assert_eq!(address, expected);
}

#[tokio::test]
async fn publish_pointer_failure_carries_publish_context() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("pointer store down"))
        .mount(&server)
        .await;

    let key = SigningKey::from_bytes(&[4u8; 32]);
    let err = client(&server)
        .publish_pointer(&key, &gazette_core::StorageRef::normalize(HASH))
        .await
        .expect_err("must fail");
    match err {
        StorageError::Api { context, .. } => assert_eq!(context, "publish-failed"),
        other => panic!("expected Api error, got {other:?}"),
    }
}
