//! `PostgreSQL` implementation of [`BlogStore`].
//!
//! Queries are built at runtime with `sqlx::QueryBuilder` because the article
//! listing composes optional filters.

use async_trait::async_trait;
use pressroom_core::{Article, ArticleId, Category, CategoryId, User, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use crate::store::{ArticleFilter, ArticleQuery, BlogStore, StoreError};

const ARTICLE_COLUMNS: &str = "a.id, a.title, a.slug, a.excerpt, a.content, \
     a.featured_image_url, a.reading_time, a.author_id, a.published_at, a.is_featured";

/// Blog store backed by the `blog` schema.
#[derive(Debug, Clone)]
pub struct PgBlogStore {
    pool: PgPool,
}

impl PgBlogStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Escape `%`, `_`, and `\` so a search term matches literally in `ILIKE`.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append the `WHERE` clause for `filter` to a query over `blog.articles a`.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ArticleFilter) {
    qb.push(" WHERE TRUE");

    if let Some(category_id) = filter.category_id {
        qb.push(
            " AND EXISTS (SELECT 1 FROM blog.article_categories ac \
             WHERE ac.article_id = a.id AND ac.category_id = ",
        )
        .push_bind(category_id)
        .push(")");
    }

    if let Some(term) = &filter.search {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(" AND (a.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR a.excerpt ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR a.content ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl BlogStore for PgBlogStore {
    #[instrument(skip(self))]
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM blog.categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM blog.categories WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(ARTICLE_COLUMNS).push(" FROM blog.articles a");
        push_filter(&mut qb, &query.filter);
        qb.push(" ORDER BY a.published_at DESC, a.id ASC");
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(i64::from(limit));
        }
        qb.push(" OFFSET ").push_bind(i64::from(query.offset));

        let articles = qb
            .build_query_as::<Article>()
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    #[instrument(skip(self))]
    async fn count_articles(&self, filter: &ArticleFilter) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM blog.articles a");
        push_filter(&mut qb, filter);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        u64::try_from(count)
            .map_err(|_| StoreError::DataCorruption(format!("negative article count: {count}")))
    }

    #[instrument(skip(self))]
    async fn featured_articles(&self) -> Result<Vec<Article>, StoreError> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM blog.articles a \
             WHERE a.is_featured ORDER BY a.published_at DESC, a.id ASC"
        );
        let articles = sqlx::query_as::<_, Article>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    #[instrument(skip(self))]
    async fn article_by_slug(&self, slug: &str) -> Result<Option<Article>, StoreError> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM blog.articles a WHERE a.slug = $1");
        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(article)
    }

    #[instrument(skip(self))]
    async fn article_by_id(&self, id: ArticleId) -> Result<Option<Article>, StoreError> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM blog.articles a WHERE a.id = $1");
        let article = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(article)
    }

    #[instrument(skip(self))]
    async fn related_articles(
        &self,
        id: ArticleId,
        limit: u32,
    ) -> Result<Vec<Article>, StoreError> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} \
             FROM blog.articles a \
             JOIN blog.article_categories ac ON ac.article_id = a.id \
             WHERE a.id <> $1 \
               AND ac.category_id IN ( \
                   SELECT category_id FROM blog.article_categories WHERE article_id = $1) \
             GROUP BY a.id \
             ORDER BY COUNT(*) DESC, a.published_at DESC, a.id ASC \
             LIMIT $2"
        );
        let articles = sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    #[instrument(skip(self))]
    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        let ids: Vec<i32> = ids.iter().map(UserId::as_i32).collect();
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, password, full_name, bio, avatar_url \
             FROM blog.users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn categories_for_articles(
        &self,
        ids: &[ArticleId],
    ) -> Result<Vec<(ArticleId, Category)>, StoreError> {
        let ids: Vec<i32> = ids.iter().map(ArticleId::as_i32).collect();
        let rows = sqlx::query_as::<_, (ArticleId, CategoryId, String, String)>(
            "SELECT ac.article_id, c.id, c.name, c.slug \
             FROM blog.article_categories ac \
             JOIN blog.categories c ON c.id = ac.category_id \
             WHERE ac.article_id = ANY($1) \
             ORDER BY ac.article_id, c.id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(article_id, id, name, slug)| (article_id, Category { id, name, slug }))
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pressroom_core::seed::SeedDocument;

    use super::*;
    use crate::db::load_seed;

    const SEED: &str = include_str!("../../seed/blog.yaml");

    async fn seeded(pool: PgPool) -> PgBlogStore {
        let records = SeedDocument::from_yaml(SEED).unwrap().materialize().unwrap();
        load_seed(&pool, &records).await.unwrap();
        PgBlogStore::new(pool)
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("acme"), "acme");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_search_is_case_insensitive(pool: PgPool) {
        let store = seeded(pool).await;
        let upper = ArticleFilter::new(None, Some("ACME"));
        let lower = ArticleFilter::new(None, Some("acme"));

        assert_eq!(store.count_articles(&upper).await.unwrap(), 1);
        assert_eq!(store.count_articles(&lower).await.unwrap(), 1);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_related_excludes_source(pool: PgPool) {
        let store = seeded(pool).await;
        let source = store
            .article_by_slug("how-to-save-5-hours-a-week-with-automated-progress-reports")
            .await
            .unwrap()
            .unwrap();

        let related = store.related_articles(source.id, 10).await.unwrap();
        assert!(!related.is_empty());
        assert!(related.iter().all(|a| a.id != source.id));
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_category_filter_counts_match_listing(pool: PgPool) {
        let store = seeded(pool).await;
        let automation = store.category_by_slug("automation").await.unwrap().unwrap();
        let filter = ArticleFilter::new(Some(automation.id), None);
        let listed = store
            .articles(&ArticleQuery {
                filter: filter.clone(),
                ..ArticleQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(store.count_articles(&filter).await.unwrap(), listed.len() as u64);
    }
}
