//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! pr-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `BLOG_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! Migrations live in `crates/blog/migrations/` and are embedded at build time.

use pressroom_blog::db;

use super::{CommandError, database_url};

/// Apply pending blog migrations.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to blog database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running blog migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Blog migrations complete!");
    Ok(())
}
