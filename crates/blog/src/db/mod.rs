//! `PostgreSQL` backend for the blog store.
//!
//! # Schema: `blog`
//!
//! ## Tables
//!
//! - `users` - Article authors
//! - `categories` - Article categories (unique name and slug)
//! - `articles` - Published articles
//! - `article_categories` - Article/category links (composite primary key)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/blog/migrations/` and run via:
//! ```bash
//! cargo run -p pressroom-cli -- migrate
//! ```

pub mod articles;
pub mod seed;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

pub use articles::PgBlogStore;
pub use seed::load_seed;

/// Embedded migrations from `crates/blog/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply any pending migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the applied history does
/// not match the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
