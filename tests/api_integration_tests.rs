//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use record_cache::{create_router, AppState, CacheStats, Config, RecordService, TtlCache};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::from_config(&Config::default()))
}

/// App whose cache uses a short TTL, for expiry tests.
fn create_short_ttl_app(ttl: Duration) -> Router {
    let stats = Arc::new(CacheStats::new());
    let service = RecordService::new(TtlCache::new(ttl, stats.clone()));
    create_router(AppState::new(service, stats, Config::default()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn create_record(app: &Router, name: &str) -> Value {
    let body = format!(r#"{{"name":"{}","email":"{}@example.com"}}"#, name, name);
    let response = send(app, "POST", "/records", Some(&body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_to_json(response.into_body()).await
}

// == CREATE Endpoint Tests ==

#[tokio::test]
async fn test_create_endpoint_success() {
    let app = create_test_app();

    let json = create_record(&app, "ada").await;

    assert_eq!(json["id"].as_u64().unwrap(), 1);
    assert_eq!(json["name"].as_str().unwrap(), "ada");
    assert_eq!(json["email"].as_str().unwrap(), "ada@example.com");
    assert!(json.get("created_at").is_some());
    assert!(json.get("updated_at").is_some());
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let app = create_test_app();

    let first = create_record(&app, "ada").await;
    let second = create_record(&app, "grace").await;

    assert_eq!(first["id"].as_u64().unwrap() + 1, second["id"].as_u64().unwrap());
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app();
    let created = create_record(&app, "ada").await;

    let response = send(&app, "GET", "/records/1", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, created);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let response = send(&app, "GET", "/records/999", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"].as_str().unwrap(), "Record not found: 999");
}

#[tokio::test]
async fn test_get_after_cache_expiry_refills() {
    let app = create_short_ttl_app(Duration::from_millis(30));
    create_record(&app, "ada").await;

    tokio::time::sleep(Duration::from_millis(60)).await;

    // The cached copy is gone, but the store still has the record.
    let response = send(&app, "GET", "/records/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_to_json(send(&app, "GET", "/stats", None).await.into_body()).await;
    assert_eq!(stats["misses"].as_u64().unwrap(), 1);
    assert_eq!(stats["cached_entries"].as_u64().unwrap(), 1);
}

// == LIST Endpoint Tests ==

#[tokio::test]
async fn test_list_endpoint_pagination() {
    let app = create_test_app();
    for name in ["ada", "grace", "linus"] {
        create_record(&app, name).await;
    }

    let all = body_to_json(send(&app, "GET", "/records?limit=10&offset=0", None).await.into_body()).await;
    assert_eq!(all["count"].as_u64().unwrap(), 3);
    assert_eq!(all["total"].as_u64().unwrap(), 3);
    assert_eq!(all["records"].as_array().unwrap().len(), 3);

    let tail = body_to_json(send(&app, "GET", "/records?limit=2&offset=2", None).await.into_body()).await;
    assert_eq!(tail["records"].as_array().unwrap().len(), 1);

    let past_end = body_to_json(send(&app, "GET", "/records?limit=5&offset=10", None).await.into_body()).await;
    assert!(past_end["records"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_endpoint_clamps_limit() {
    let app = create_test_app();

    let response = send(&app, "GET", "/records?limit=100000", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["limit"].as_u64().unwrap(), 100);
}

// == UPDATE Endpoint Tests ==

#[tokio::test]
async fn test_update_endpoint_is_visible_on_next_read() {
    let app = create_test_app();
    create_record(&app, "ada").await;

    // Warm the cache.
    send(&app, "GET", "/records/1", None).await;

    let response = send(
        &app,
        "PUT",
        "/records/1",
        Some(r#"{"name":"grace","email":"grace@example.com"}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(send(&app, "GET", "/records/1", None).await.into_body()).await;
    assert_eq!(json["name"].as_str().unwrap(), "grace");
}

#[tokio::test]
async fn test_update_endpoint_not_found() {
    let app = create_test_app();

    let response = send(
        &app,
        "PUT",
        "/records/42",
        Some(r#"{"name":"grace","email":"grace@example.com"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app();
    create_record(&app, "ada").await;

    let response = send(&app, "DELETE", "/records/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"].as_u64().unwrap(), 1);

    let response = send(&app, "GET", "/records/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_not_found() {
    let app = create_test_app();

    let response = send(&app, "DELETE", "/records/1", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();
    create_record(&app, "ada").await;

    send(&app, "GET", "/records/1", None).await; // hit (written through on create)
    send(&app, "GET", "/records/999", None).await; // miss

    let response = send(&app, "GET", "/stats", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["cached_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["total_records"].as_u64().unwrap(), 1);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = send(&app, "POST", "/records", Some(r#"{"invalid json"#)).await;

    // Axum returns 400 or 422 for JSON parsing errors
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_empty_name_request() {
    let app = create_test_app();

    let response = send(
        &app,
        "POST",
        "/records",
        Some(r#"{"name":"","email":"ada@example.com"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}
