//! Storage interface for blog content.
//!
//! [`BlogStore`] is the only way the catalog touches data. Two backends
//! implement it:
//!
//! - [`MemoryStore`] - immutable, built from a seed document (tests, demos)
//! - [`PgBlogStore`](crate::db::PgBlogStore) - `PostgreSQL` via sqlx
//!
//! Stores return bare records. Resolving authors and categories onto an
//! article is the catalog's job.

pub mod memory;

use async_trait::async_trait;
use pressroom_core::seed::SeedError;
use pressroom_core::{Article, ArticleId, Category, CategoryId, User, UserId};
use thiserror::Error;

pub use memory::MemoryStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Seed data could not be read.
    #[error("seed file error: {0}")]
    SeedIo(#[from] std::io::Error),

    /// Seed data is invalid.
    #[error("seed error: {0}")]
    Seed(#[from] SeedError),
}

/// Article filters. Both filters must hold when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Only articles linked to this category.
    pub category_id: Option<CategoryId>,
    /// Case-insensitive substring of title, excerpt, or content.
    pub search: Option<String>,
}

impl ArticleFilter {
    /// Build a filter, treating a blank search term as no search.
    #[must_use]
    pub fn new(category_id: Option<CategoryId>, search: Option<&str>) -> Self {
        Self {
            category_id,
            search: search
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_owned),
        }
    }
}

/// A filtered, paginated article listing request.
///
/// Results are ordered by `published_at` descending, then id ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub filter: ArticleFilter,
    /// Maximum number of articles; `None` means no limit.
    pub limit: Option<u32>,
    /// Number of matching articles to skip.
    pub offset: u32,
}

/// Read access to users, categories, and articles.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All categories, ordered by name.
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError>;

    /// Articles matching `query.filter`, newest first, sliced by offset/limit.
    async fn articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, StoreError>;

    /// Number of articles matching `filter`.
    async fn count_articles(&self, filter: &ArticleFilter) -> Result<u64, StoreError>;

    /// Featured articles, newest first.
    async fn featured_articles(&self) -> Result<Vec<Article>, StoreError>;

    async fn article_by_slug(&self, slug: &str) -> Result<Option<Article>, StoreError>;

    async fn article_by_id(&self, id: ArticleId) -> Result<Option<Article>, StoreError>;

    /// Articles sharing at least one category with `id`, ranked by number of
    /// shared categories then recency. Never includes `id` itself.
    async fn related_articles(
        &self,
        id: ArticleId,
        limit: u32,
    ) -> Result<Vec<Article>, StoreError>;

    /// Users with the given ids. Unknown ids are silently skipped.
    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError>;

    /// `(article, category)` pairs for the given articles, ordered by
    /// article id then category id.
    async fn categories_for_articles(
        &self,
        ids: &[ArticleId],
    ) -> Result<Vec<(ArticleId, Category)>, StoreError>;

    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_blank_search_is_none() {
        assert_eq!(ArticleFilter::new(None, Some("   ")).search, None);
        assert_eq!(ArticleFilter::new(None, Some("")).search, None);
        assert_eq!(
            ArticleFilter::new(None, Some(" Acme ")).search.as_deref(),
            Some("Acme")
        );
    }
}
