//! Seed the blog database from a YAML document.
//!
//! Existing users, categories, articles, and links are removed and the
//! document is inserted in one transaction. The document is fully validated
//! before any connection is opened.

use std::path::Path;

use pressroom_blog::db;
use pressroom_core::seed::SeedDocument;
use tracing::info;

use super::{CommandError, database_url};

/// Seed document shipped with the blog crate.
pub const DEFAULT_SEED_FILE: &str = "crates/blog/seed/blog.yaml";

/// Replace blog data with the document at `path`.
pub async fn run(path: &Path) -> Result<(), CommandError> {
    info!(path = %path.display(), "Loading seed document");

    let content = tokio::fs::read_to_string(path).await?;
    let records = SeedDocument::from_yaml(&content)?.materialize()?;

    info!(
        users = records.users.len(),
        categories = records.categories.len(),
        articles = records.articles.len(),
        "Seed document validated"
    );

    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    db::load_seed(&pool, &records).await?;

    info!("Seeding complete");
    Ok(())
}
