//! Integration tests for the article and category endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use pressroom_blog::catalog::UnknownCategoryPolicy;
use pressroom_integration_tests::{TestApp, slugs};
use serde_json::json;

const NEWEST: &str = "how-to-save-5-hours-a-week-with-automated-progress-reports";
const ACME: &str = "case-study-how-acme-corp-reduced-reporting-time-by-83-percent";

#[tokio::test]
async fn test_list_defaults() {
    let response = TestApp::new().get("/api/articles").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["pagination"],
        json!({ "total": 6, "page": 1, "totalPages": 1, "limit": 9 })
    );
    let articles = slugs(&response.body["articles"]);
    assert_eq!(articles.len(), 6);
    assert_eq!(articles[0], NEWEST);
}

#[tokio::test]
async fn test_list_second_page() {
    let response = TestApp::new().get("/api/articles?page=2&limit=2").await;

    assert_eq!(
        slugs(&response.body["articles"]),
        vec!["10-custom-templates-for-different-industries", ACME]
    );
    assert_eq!(response.body["pagination"]["totalPages"], 3);
    assert_eq!(response.body["pagination"]["page"], 2);
}

#[tokio::test]
async fn test_list_page_past_end_is_empty() {
    let response = TestApp::new().get("/api/articles?page=50").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["articles"], json!([]));
    assert_eq!(response.body["pagination"]["total"], 6);
}

#[tokio::test]
async fn test_list_invalid_numbers_fall_back() {
    let app = TestApp::new();

    let response = app.get("/api/articles?page=abc&limit=-3").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pagination"]["page"], 1);
    assert_eq!(response.body["pagination"]["limit"], 9);

    let response = app.get("/api/articles?limit=1000").await;
    assert_eq!(response.body["pagination"]["limit"], 100);
}

#[tokio::test]
async fn test_list_by_category() {
    let response = TestApp::new().get("/api/articles?category=automation").await;

    assert_eq!(response.body["pagination"]["total"], 5);
    let articles = response.body["articles"].as_array().unwrap();
    assert_eq!(articles[0]["slug"], NEWEST);
    for article in articles {
        let categories = article["categories"].as_array().unwrap();
        assert!(categories.iter().any(|c| c["slug"] == "automation"));
    }
}

#[tokio::test]
async fn test_list_search_is_case_insensitive() {
    let app = TestApp::new();

    for term in ["acme", "ACME", "AcMe"] {
        let response = app.get(&format!("/api/articles?search={term}")).await;
        assert_eq!(slugs(&response.body["articles"]), vec![ACME], "{term}");
        assert_eq!(response.body["pagination"]["total"], 1);
    }
}

#[tokio::test]
async fn test_list_category_and_search() {
    let response = TestApp::new()
        .get("/api/articles?category=productivity&search=metrics")
        .await;

    assert_eq!(
        slugs(&response.body["articles"]),
        vec!["5-key-metrics-every-progress-report-should-include"]
    );
}

#[tokio::test]
async fn test_unknown_category_matches_nothing() {
    let response = TestApp::new().get("/api/articles?category=missing").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["articles"], json!([]));
    assert_eq!(
        response.body["pagination"],
        json!({ "total": 0, "page": 1, "totalPages": 0, "limit": 9 })
    );
}

#[tokio::test]
async fn test_unknown_category_unfiltered_policy() {
    let app = TestApp::with_policy(UnknownCategoryPolicy::Unfiltered);
    let response = app.get("/api/articles?category=missing").await;

    assert_eq!(response.body["pagination"]["total"], 6);
}

#[tokio::test]
async fn test_featured() {
    let response = TestApp::new().get("/api/articles/featured").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(slugs(&response.body), vec![NEWEST]);
    assert_eq!(response.body[0]["isFeatured"], true);
}

#[tokio::test]
async fn test_show_article() {
    let response = TestApp::new()
        .get("/api/articles/connecting-reportflow-to-your-project-management-tool")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let article = &response.body;
    assert_eq!(article["readingTime"], 10);
    assert_eq!(article["isFeatured"], false);
    assert_eq!(article["author"]["fullName"], "Sarah Johnson");
    assert!(article["author"].get("password").is_none());
    assert_eq!(
        article["categories"],
        json!([
            { "id": 1, "name": "Tutorials", "slug": "tutorials" },
            { "id": 3, "name": "Automation", "slug": "automation" }
        ])
    );
}

#[tokio::test]
async fn test_show_missing_article() {
    let response = TestApp::new().get("/api/articles/does-not-exist").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "message": "Article not found" }));
}

#[tokio::test]
async fn test_related_default_limit() {
    let response = TestApp::new()
        .get(&format!("/api/articles/{NEWEST}/related"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        slugs(&response.body),
        vec![
            "connecting-reportflow-to-your-project-management-tool",
            "10-custom-templates-for-different-industries",
            ACME,
        ]
    );
}

#[tokio::test]
async fn test_related_limit() {
    let app = TestApp::new();

    let response = app
        .get(&format!("/api/articles/{NEWEST}/related?limit=1"))
        .await;
    assert_eq!(
        slugs(&response.body),
        vec!["connecting-reportflow-to-your-project-management-tool"]
    );

    let response = app
        .get(&format!("/api/articles/{NEWEST}/related?limit=abc"))
        .await;
    assert_eq!(slugs(&response.body).len(), 3);
}

#[tokio::test]
async fn test_related_never_includes_source() {
    let app = TestApp::new();
    let listing = app.get("/api/articles").await;

    for slug in slugs(&listing.body["articles"]) {
        let response = app
            .get(&format!("/api/articles/{slug}/related?limit=10"))
            .await;
        assert!(!slugs(&response.body).contains(&slug));
    }
}

#[tokio::test]
async fn test_related_missing_article() {
    let response = TestApp::new()
        .get("/api/articles/does-not-exist/related")
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Article not found");
}

#[tokio::test]
async fn test_categories_sorted_by_name() {
    let response = TestApp::new().get("/api/categories").await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Automation", "Case Studies", "Productivity", "Tutorials"]);
}
