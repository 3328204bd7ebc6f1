//! Integration tests for the Readwise and Pocket export clients
//!
//! HTTP endpoints are served by mockito.

mod common;

use chrono::{TimeZone, Utc};
use common::*;
use ferry::adapters::integrations::{
    IntegrationClient, IntegrationClientRegistry, PocketClient, ReadwiseClient,
};
use ferry::adapters::store::InMemoryStore;
use ferry::config::{
    secret_string, IntegrationsConfig, PocketConfig, ReadwiseConfig, RetryConfig,
};
use ferry::core::export::ExportDispatcher;
use ferry::domain::{
    ExportJobRequest, FerryError, Highlight, HighlightId, HighlightType, IntegrationError,
    LibraryItem, LibraryItemBuilder, LibraryItemId,
};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

fn readwise_config(base_url: &str) -> ReadwiseConfig {
    ReadwiseConfig {
        enabled: true,
        base_url: base_url.to_string(),
        highlight_base_url: "https://reader.example.com".to_string(),
        timeout_seconds: 5,
        retry: RetryConfig {
            max_retries: 2,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
        },
    }
}

fn pocket_config(base_url: &str) -> PocketConfig {
    PocketConfig {
        base_url: base_url.to_string(),
        consumer_key: secret_string("consumer-key".to_string()),
        timeout_seconds: 5,
    }
}

fn highlighted_item(id: &str) -> LibraryItem {
    LibraryItemBuilder::new()
        .id(LibraryItemId::new(id).unwrap())
        .user_id(user_id("u1"))
        .title("The Rust Book")
        .original_url("https://doc.rust-lang.org/book/")
        .author("Steve Klabnik")
        .label("rust")
        .label("books")
        .highlight(Highlight {
            id: HighlightId::new("h1").unwrap(),
            highlight_type: HighlightType::Highlight,
            quote: Some("Rust's ownership model".to_string()),
            annotation: None,
            created_at: Utc.with_ymd_and_hms(2024, 2, 10, 9, 30, 0).unwrap(),
        })
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_readwise_posts_highlights_with_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/highlights/")
        .match_header("authorization", "Token rw-token")
        .match_body(Matcher::PartialJson(json!({
            "highlights": [{
                "text": "Rust's ownership model",
                "title": "The Rust Book",
                "author": "Steve Klabnik",
                "highlight_url": "https://reader.example.com/me/i1#h1",
                "category": "articles",
                "location_type": "order",
                "source_type": "omnivore",
                "source_url": "https://doc.rust-lang.org/book/"
            }]
        })))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let client = ReadwiseClient::new(readwise_config(&server.url())).unwrap();
    let synced = client
        .export(&secret_string("rw-token".to_string()), &[highlighted_item("i1")])
        .await
        .unwrap();

    assert!(synced);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_readwise_refused_token_returns_false() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/highlights/")
        .with_status(401)
        .with_body(r#"{"detail":"Invalid token."}"#)
        .expect(1)
        .create_async()
        .await;

    let client = ReadwiseClient::new(readwise_config(&server.url())).unwrap();
    let synced = client
        .export(&secret_string("bad".to_string()), &[highlighted_item("i1")])
        .await
        .unwrap();

    assert!(!synced);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_readwise_retries_rate_limit_then_gives_up() {
    let mut server = mockito::Server::new_async().await;
    // One attempt plus two retries
    let mock = server
        .mock("POST", "/highlights/")
        .with_status(429)
        .expect(3)
        .create_async()
        .await;

    let client = ReadwiseClient::new(readwise_config(&server.url())).unwrap();
    let synced = client
        .export(&secret_string("rw-token".to_string()), &[highlighted_item("i1")])
        .await
        .unwrap();

    assert!(!synced);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_readwise_server_error_is_fault() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/highlights/")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let client = ReadwiseClient::new(readwise_config(&server.url())).unwrap();
    let err = client
        .export(&secret_string("rw-token".to_string()), &[highlighted_item("i1")])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FerryError::Integration(IntegrationError::ServerError { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_pocket_sends_add_actions() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v3/send")
        .match_header("x-accept", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "consumer_key": "consumer-key",
            "access_token": "pk-token",
            "actions": [
                {"action": "add", "url": "https://doc.rust-lang.org/book/", "tags": "rust,books"},
                {"action": "add", "title": "The Rust Book"}
            ]
        })))
        .with_status(200)
        .with_body(r#"{"status":1,"action_results":[true,true]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = PocketClient::new(pocket_config(&server.url())).unwrap();
    let synced = client
        .export(
            &secret_string("pk-token".to_string()),
            &[highlighted_item("i1"), highlighted_item("i2")],
        )
        .await
        .unwrap();

    assert!(synced);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_pocket_unsuccessful_status_returns_false() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v3/send")
        .with_status(200)
        .with_body(r#"{"status":0}"#)
        .create_async()
        .await;

    let client = PocketClient::new(pocket_config(&server.url())).unwrap();
    let synced = client
        .export(&secret_string("pk-token".to_string()), &[highlighted_item("i1")])
        .await
        .unwrap();

    assert!(!synced);
}

#[tokio::test]
async fn test_pocket_malformed_body_is_fault() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v3/send")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = PocketClient::new(pocket_config(&server.url())).unwrap();
    let err = client
        .export(&secret_string("pk-token".to_string()), &[highlighted_item("i1")])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FerryError::Integration(IntegrationError::InvalidResponse { .. })
    ));
}

#[tokio::test]
async fn test_readwise_synced_while_pocket_unreachable() {
    let mut server = mockito::Server::new_async().await;
    let readwise_mock = server
        .mock("POST", "/highlights/")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let config = IntegrationsConfig {
        readwise: readwise_config(&server.url()),
        // Nothing listens on the discard port
        pocket: Some(pocket_config("http://127.0.0.1:9")),
    };
    let clients = Arc::new(IntegrationClientRegistry::from_config(&config).unwrap());

    let store = Arc::new(InMemoryStore::new());
    store.insert_library_item(highlighted_item("i1")).await;
    store.insert_library_item(highlighted_item("i2")).await;
    store.insert_integration(integration("g1", "u1", "readwise")).await;
    store.insert_integration(integration("g2", "u1", "pocket")).await;

    let dispatcher = ExportDispatcher::new(store.clone(), store.clone(), clients);
    let report = dispatcher
        .dispatch(&ExportJobRequest::new(user_id("u1"), item_ids(&["i1", "i2"])))
        .await
        .unwrap();

    assert_eq!(report.synced_count(), 1);
    assert_eq!(report.fault_count(), 1);
    readwise_mock.assert_async().await;

    let g1 = store.integration(&integration_id("g1")).await.unwrap();
    let g2 = store.integration(&integration_id("g2")).await.unwrap();
    assert!(g1.synced_at.is_some());
    assert!(g2.synced_at.is_none());
}
