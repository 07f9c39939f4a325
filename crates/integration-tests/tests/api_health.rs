//! Integration tests for health checks and cross-cutting middleware.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pressroom_blog::middleware::REQUEST_ID_HEADER;
use pressroom_integration_tests::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_liveness() {
    let response = TestApp::new().get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!("ok"));
}

#[tokio::test]
async fn test_readiness_with_memory_store() {
    let response = TestApp::new().get("/health/ready").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_every_response_has_request_id() {
    let app = TestApp::new();

    for uri in ["/health", "/api/categories", "/api/articles/does-not-exist"] {
        let response = app.get(uri).await;
        let id = response.headers.get(REQUEST_ID_HEADER);
        assert!(id.is_some_and(|v| !v.is_empty()), "{uri}");
    }
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let request = Request::get("/api/categories")
        .header(REQUEST_ID_HEADER, "edge-42")
        .body(Body::empty())
        .unwrap();

    let response = TestApp::new().send(request).await;
    assert_eq!(response.headers[REQUEST_ID_HEADER], "edge-42");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = TestApp::new().get("/api/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "message": "Not found" }));
}
