//! End-to-end tests against a real listening server.

use std::net::SocketAddr;

use record_cache::{create_router, AppState, Config, Record};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Starts the server on an ephemeral port and returns its base URL.
async fn spawn_server() -> (String, AppState) {
    let state = AppState::from_config(&Config::default());
    let app = create_router(state.clone());

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

#[tokio::test]
async fn test_record_lifecycle_over_http() {
    let (base, state) = spawn_server().await;
    let client = reqwest::Client::new();

    let created: Record = client
        .post(format!("{}/records", base))
        .json(&json!({"name": "Ada", "email": "ada@example.com"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    let fetched: Record = client
        .get(format!("{}/records/{}", base, created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);

    let response = client
        .delete(format!("{}/records/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/records/{}", base, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Record not found: 1");

    state.service.shutdown().await;
}

#[tokio::test]
async fn test_stats_over_http() {
    let (base, state) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .get(format!("{}/records/5", base))
        .send()
        .await
        .unwrap();

    let stats: Value = client
        .get(format!("{}/stats", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["hits"], 0);
    assert_eq!(stats["total_records"], 0);

    state.service.shutdown().await;
}
