//! End-to-end write-path tests: batch resolution over HTTP, collection
//! manifest upload, website pointer publish, and the save-then-fetch
//! round trip with a gateway standing in for the network.

use std::sync::Arc;

use ed25519_dalek::SigningKey;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gazette_core::{BatchId, StorageRef};
use gazette_storage::{
    BatchResolver, Collection, GatewayConfig, GatewayFetcher, KeyValueStore, MemoryStore,
    NodeClient, NodeConfig, Resource, StorageError, Website, LAST_BATCH_KEY,
};

const MANIFEST_REF: &str = "9f8e7d6c5b4a39289f8e7d6c5b4a39289f8e7d6c5b4a39289f8e7d6c5b4a3928";

fn node(server: &MockServer) -> Arc<NodeClient> {
    Arc::new(NodeClient::new(&NodeConfig::new(server.uri())).expect("client build"))
}

#[tokio::test]
async fn resolver_picks_greatest_capacity_usable_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"batch_id": "a".repeat(64), "usable": true, "remaining_capacity": 10},
            {"batch_id": "b".repeat(64), "usable": true, "remaining_capacity": 50},
            {"batch_id": "c".repeat(64), "usable": false, "remaining_capacity": 100},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let resolver = BatchResolver::new(node(&server), store.clone(), false);

    let id = resolver.resolve(None).await.expect("resolve");
    assert_eq!(id.as_str(), "b".repeat(64));
    // The winner is persisted as the new default…
    assert_eq!(store.get(LAST_BATCH_KEY), Some("b".repeat(64)));
    // …and the next resolution uses it without another listing call
    // (the mock's expect(1) verifies zero further network calls).
    let again = resolver.resolve(None).await.expect("cached resolve");
    assert_eq!(again, id);
}

#[tokio::test]
async fn resolver_returns_explicit_valid_id_without_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let resolver = BatchResolver::new(node(&server), Arc::new(MemoryStore::new()), false);
    let explicit = "d".repeat(64);
    let id = resolver.resolve(Some(&explicit)).await.expect("resolve");
    assert_eq!(id.as_str(), explicit);
}

#[tokio::test]
async fn resolver_dev_mode_falls_back_to_placeholder() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"batch_id": "c".repeat(64), "usable": false, "remaining_capacity": 100},
        ])))
        .mount(&server)
        .await;

    let resolver = BatchResolver::new(node(&server), Arc::new(MemoryStore::new()), true);
    let id = resolver.resolve(None).await.expect("placeholder fallback");
    assert_eq!(id, BatchId::placeholder());
}

#[tokio::test]
async fn resolver_production_fails_hard_without_capacity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let resolver = BatchResolver::new(node(&server), Arc::new(MemoryStore::new()), false);
    let err = resolver.resolve(None).await.expect_err("must fail");
    assert!(matches!(err, StorageError::NoUsableCapacity));
}

#[tokio::test]
async fn resource_save_resolves_a_batch_then_uploads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"batch_id": "e".repeat(64), "usable": true, "remaining_capacity": 7},
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resources"))
        .and(wiremock::matchers::header("x-postage-batch", "e".repeat(64).as_str()))
        .and(wiremock::matchers::query_param("name", "banner.png"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"reference": MANIFEST_REF})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let node = node(&server);
    let resolver = BatchResolver::new(node.clone(), Arc::new(MemoryStore::new()), false);

    let resource = Resource::new("banner.png", vec![1, 2, 3], "image/png");
    let reference = resource.save(&node, &resolver).await.expect("save");
    assert_eq!(reference.as_str(), MANIFEST_REF);
}

#[tokio::test]
async fn collection_save_then_fetch_round_trips() {
    let node_server = MockServer::start().await;
    let gateway_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"batch_id": "e".repeat(64), "usable": true, "remaining_capacity": 7},
        ])))
        .mount(&node_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/manifests"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"reference": MANIFEST_REF})),
        )
        .expect(1)
        .mount(&node_server)
        .await;

    // The gateway serves back exactly the bytes the collection uploaded.
    Mock::given(method("GET"))
        .and(path(format!("/manifest-access/{MANIFEST_REF}/index.html")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<html>post</html>".to_vec()))
        .mount(&gateway_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/manifest-access/{MANIFEST_REF}/images/banner.png")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .mount(&gateway_server)
        .await;

    let node = node(&node_server);
    let resolver = BatchResolver::new(node.clone(), Arc::new(MemoryStore::new()), false);

    let mut collection = Collection::new();
    collection
        .add("index.html", b"<html>post</html>".to_vec(), "text/html")
        .add("images/banner.png", vec![1, 2, 3], "image/png");
    let manifest = collection.save(&node, &resolver).await.expect("save");
    assert_eq!(manifest.as_str(), MANIFEST_REF);

    let fetcher = GatewayFetcher::new(&GatewayConfig::new(vec![gateway_server.uri()]))
        .expect("fetcher build");

    let page = fetcher
        .fetch(&StorageRef::normalize(&format!("{MANIFEST_REF}/index.html")), None)
        .await
        .expect("fetch page");
    assert_eq!(*page, b"<html>post</html>".to_vec());

    let banner = fetcher
        .fetch(
            &StorageRef::normalize(&format!("{MANIFEST_REF}/images/banner.png")),
            None,
        )
        .await
        .expect("fetch banner");
    assert_eq!(*banner, vec![1, 2, 3]);
}

#[tokio::test]
async fn website_publish_updates_pointer_after_manifest_upload() {
    let server = MockServer::start().await;

    let key = SigningKey::from_bytes(&[5u8; 32]);

    Mock::given(method("GET"))
        .and(path("/batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"batch_id": "e".repeat(64), "usable": true, "remaining_capacity": 7},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/manifests"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"reference": MANIFEST_REF})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut collection = Collection::new();
    collection.add("index.html", b"<html/>".to_vec(), "text/html");
    let site = Website::new(key, collection);
    let expected_address = site.address();

    Mock::given(method("POST"))
        .and(path(format!("/pointers/{}", expected_address.as_str())))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            serde_json::json!({"address": expected_address.as_str()}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let node = node(&server);
    let resolver = BatchResolver::new(node.clone(), Arc::new(MemoryStore::new()), false);

    let publish = site.publish(&node, &resolver).await.expect("publish");
    assert_eq!(publish.address, expected_address);
    assert_eq!(publish.manifest_reference.as_str(), MANIFEST_REF);
}
