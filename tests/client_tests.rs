//! Client Tests
//!
//! Runs the server on an ephemeral port and drives it with `CacheClient`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use memkv::client::ClientError;
use memkv::{api::create_router, AppState, Cache, CacheClient};
use serde_json::json;
use tokio::net::TcpListener;

async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(AppState::new(Cache::new(Duration::from_secs(10))));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

async fn test_client() -> CacheClient {
    let addr = spawn_server().await;
    CacheClient::new(format!("http://{}", addr))
}

#[tokio::test]
async fn test_client_health() {
    let client = test_client().await;

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_client_set_get_remove() {
    let client = test_client().await;

    client.set("test-key", json!("test-value"), 10).await.unwrap();
    assert_eq!(client.get("test-key").await.unwrap(), json!("test-value"));
    assert_eq!(client.keys().await.unwrap(), vec!["test-key".to_string()]);

    client.remove("test-key").await.unwrap();
    assert!(matches!(client.get("test-key").await, Err(ClientError::NotFound)));

    // Removing again is still a success
    client.remove("test-key").await.unwrap();
}

#[tokio::test]
async fn test_client_lists() {
    let client = test_client().await;

    for i in 1..=5 {
        client.rpush("numbers", json!(i), 0).await.unwrap();
    }

    assert_eq!(client.get("numbers").await.unwrap(), json!([1, 2, 3, 4, 5]));
    assert_eq!(client.lindex("numbers", 4).await.unwrap(), json!(5));
    assert_eq!(client.lindex("numbers", 5).await.unwrap(), json!(null));
    assert!(matches!(
        client.lindex("nothing", 0).await,
        Err(ClientError::NotFound)
    ));
}

#[tokio::test]
async fn test_client_hashes() {
    let client = test_client().await;

    let fields: HashMap<String, serde_json::Value> =
        [("name".to_string(), json!("spork")), ("count".to_string(), json!(1))].into();
    client.hset("item", fields, 0).await.unwrap();
    client
        .hset("item", [("count".to_string(), json!(2))].into(), 0)
        .await
        .unwrap();

    assert_eq!(client.hget("item", "name").await.unwrap(), json!("spork"));
    assert_eq!(client.hget("item", "count").await.unwrap(), json!(2));
    assert_eq!(client.hget("item", "missing").await.unwrap(), json!(null));
}

#[tokio::test]
async fn test_client_wrong_type_error() {
    let client = test_client().await;

    client.set("plain", json!("text"), 0).await.unwrap();
    let err = client.rpush("plain", json!(1), 0).await.unwrap_err();

    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 400);
            assert!(message.unwrap().contains("not a list"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_client_keys_with_reserved_characters() {
    let client = test_client().await;

    for key in ["user/1", "a?b", "x#y", "50%"] {
        client.set(key, json!(key), 0).await.unwrap();
        assert_eq!(client.get(key).await.unwrap(), json!(key));
    }

    client.rpush("queue/jobs", json!("first"), 0).await.unwrap();
    assert_eq!(client.lindex("queue/jobs", 0).await.unwrap(), json!("first"));

    client
        .hset("user/1/profile", [("first/name".to_string(), json!("Ada"))].into(), 0)
        .await
        .unwrap();
    assert_eq!(
        client.hget("user/1/profile", "first/name").await.unwrap(),
        json!("Ada")
    );

    client.remove("user/1").await.unwrap();
    assert!(matches!(client.get("user/1").await, Err(ClientError::NotFound)));
    assert_eq!(client.get("a?b").await.unwrap(), json!("a?b"));
}
