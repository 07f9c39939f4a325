//! Integration tests for Pressroom.
//!
//! Tests drive the blog router in-process with `tower::ServiceExt::oneshot`,
//! backed by a [`MemoryStore`] built from the bundled seed document. No
//! database or running server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pressroom-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use pressroom_blog::catalog::UnknownCategoryPolicy;
use pressroom_blog::config::BlogConfig;
use pressroom_blog::services::LogMailingList;
use pressroom_blog::state::AppState;
use pressroom_blog::store::{BlogStore, MemoryStore};
use pressroom_core::seed::SeedDocument;
use serde_json::Value;
use tower::ServiceExt;

/// The seed document served by the default memory store.
pub const SEED: &str = include_str!("../../blog/seed/blog.yaml");

/// A response reduced to what tests assert on.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// The blog router over a seeded memory store.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// App over the bundled seed with the default unknown-category policy.
    ///
    /// # Panics
    ///
    /// Panics if the bundled seed is invalid.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(UnknownCategoryPolicy::default())
    }

    /// App over the bundled seed with the given unknown-category policy.
    ///
    /// # Panics
    ///
    /// Panics if the bundled seed is invalid.
    #[must_use]
    pub fn with_policy(policy: UnknownCategoryPolicy) -> Self {
        let document = SeedDocument::from_yaml(SEED).expect("bundled seed parses");
        let store = MemoryStore::from_seed(&document).expect("bundled seed resolves");
        Self::with_store(Arc::new(store), policy)
    }

    /// App over an arbitrary store.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be built.
    #[must_use]
    pub fn with_store(store: Arc<dyn BlogStore>, policy: UnknownCategoryPolicy) -> Self {
        let mut config = BlogConfig::from_vars(|_| None).expect("default config");
        config.unknown_category = policy;

        let state = AppState::new(config, store, Arc::new(LogMailingList));
        Self {
            router: pressroom_blog::app(state),
        }
    }

    /// Send a request and collect the response.
    ///
    /// Non-JSON bodies are returned as a JSON string.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET` `uri`.
    ///
    /// # Panics
    ///
    /// Panics if `uri` is invalid.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).expect("valid request");
        self.send(request).await
    }

    /// `POST` `body` to `uri` as JSON.
    ///
    /// # Panics
    ///
    /// Panics if `uri` is invalid.
    pub async fn post_json(&self, uri: &str, body: impl Into<String>) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .expect("valid request");
        self.send(request).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Slugs of the articles in a JSON array.
#[must_use]
pub fn slugs(articles: &Value) -> Vec<String> {
    articles
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|a| a["slug"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}
