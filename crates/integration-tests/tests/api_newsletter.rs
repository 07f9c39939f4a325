//! Integration tests for newsletter signup.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pressroom_integration_tests::TestApp;
use serde_json::json;

const SUBSCRIBE: &str = "/api/newsletter/subscribe";

#[tokio::test]
async fn test_subscribe_success() {
    let response = TestApp::new()
        .post_json(SUBSCRIBE, r#"{"email": "user@example.com"}"#)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "success": true, "message": "Thank you for subscribing to our newsletter!" })
    );
}

#[tokio::test]
async fn test_subscribe_normalizes_address() {
    let response = TestApp::new()
        .post_json(SUBSCRIBE, r#"{"email": "  User@Example.COM  "}"#)
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_subscribe_invalid_address() {
    let response = TestApp::new()
        .post_json(SUBSCRIBE, r#"{"email": "not-an-email"}"#)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid email address");
    let reasons = response.body["errors"]["email"].as_array().unwrap();
    assert_eq!(reasons.len(), 1);
}

#[tokio::test]
async fn test_subscribe_rejects_malformed_bodies() {
    let app = TestApp::new();

    for body in [r"{}", r#"{"email": 42}"#, r#"{"email": null}"#, "not json", r#"{"email": ""}"#] {
        let response = app.post_json(SUBSCRIBE, body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.body["message"], "Invalid email address", "{body}");
        assert!(response.body["errors"]["email"].is_array(), "{body}");
    }
}
