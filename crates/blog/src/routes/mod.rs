//! HTTP route handlers for the blog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (store ping)
//!
//! # Categories
//! GET  /api/categories                  - All categories, by name
//!
//! # Articles
//! GET  /api/articles                    - Paginated listing (?page, limit, category, search)
//! GET  /api/articles/featured           - Featured articles
//! GET  /api/articles/{slug}             - Article detail
//! GET  /api/articles/{slug}/related     - Related articles (?limit)
//!
//! # Newsletter
//! POST /api/newsletter/subscribe        - Subscribe an email address
//! ```

pub mod articles;
pub mod categories;
pub mod health;
pub mod newsletter;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the article routes router.
pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(articles::index))
        .route("/featured", get(articles::featured))
        .route("/{slug}", get(articles::show))
        .route("/{slug}/related", get(articles::related))
}

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::index))
        .nest("/articles", article_routes())
        .route("/newsletter/subscribe", post(newsletter::subscribe))
}

/// Create all routes for the blog.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .fallback(not_found)
}

/// JSON 404 for unmatched paths.
async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_owned())
}
