//! In-memory blog store.
//!
//! Holds every record in plain collections built once from a seed. Nothing is
//! mutated after construction, so the store is shared freely behind an `Arc`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use pressroom_core::seed::{SeedDocument, SeedRecords};
use pressroom_core::{Article, ArticleCategory, ArticleId, Category, User, UserId};

use super::{ArticleFilter, ArticleQuery, BlogStore, StoreError};
use crate::ranking::rank_related;

/// Blog store backed by in-memory collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: HashMap<UserId, User>,
    /// Sorted by name.
    categories: Vec<Category>,
    /// Sorted newest first, ties by id.
    articles: Vec<Article>,
    links: Vec<ArticleCategory>,
}

impl MemoryStore {
    /// Build a store from resolved records.
    #[must_use]
    pub fn new(records: SeedRecords) -> Self {
        let SeedRecords {
            users,
            mut categories,
            mut articles,
            article_categories,
        } = records;

        categories.sort_by(|a, b| a.name.cmp(&b.name));
        articles.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        Self {
            users: users.into_iter().map(|user| (user.id, user)).collect(),
            categories,
            articles,
            links: article_categories,
        }
    }

    /// Build a store from a seed document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Seed` if the document has dangling or duplicate
    /// references.
    pub fn from_seed(document: &SeedDocument) -> Result<Self, StoreError> {
        Ok(Self::new(document.materialize()?))
    }

    /// Read and load a YAML seed file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SeedIo` if the file cannot be read, or
    /// `StoreError::Seed` if it is not a valid seed document.
    pub fn from_seed_file(path: &Path) -> Result<Self, StoreError> {
        let yaml = std::fs::read_to_string(path)?;
        let store = Self::from_seed(&SeedDocument::from_yaml(&yaml)?)?;
        tracing::info!(
            path = %path.display(),
            users = store.users.len(),
            categories = store.categories.len(),
            articles = store.articles.len(),
            "Loaded seed into memory store"
        );
        Ok(store)
    }

    fn matching<'a>(&'a self, filter: &ArticleFilter) -> impl Iterator<Item = &'a Article> + 'a {
        let in_category: Option<HashSet<ArticleId>> = filter.category_id.map(|category_id| {
            self.links
                .iter()
                .filter(|link| link.category_id == category_id)
                .map(|link| link.article_id)
                .collect()
        });
        let needle = filter.search.as_ref().map(|term| term.to_lowercase());

        self.articles.iter().filter(move |article| {
            in_category
                .as_ref()
                .is_none_or(|ids| ids.contains(&article.id))
                && needle
                    .as_deref()
                    .is_none_or(|needle| article.matches_lowercase(needle))
        })
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.categories.clone())
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        Ok(self.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, StoreError> {
        let matching = self.matching(&query.filter).skip(query.offset as usize);
        Ok(match query.limit {
            Some(limit) => matching.take(limit as usize).cloned().collect(),
            None => matching.cloned().collect(),
        })
    }

    async fn count_articles(&self, filter: &ArticleFilter) -> Result<u64, StoreError> {
        Ok(self.matching(filter).count() as u64)
    }

    async fn featured_articles(&self) -> Result<Vec<Article>, StoreError> {
        Ok(self
            .articles
            .iter()
            .filter(|article| article.is_featured)
            .cloned()
            .collect())
    }

    async fn article_by_slug(&self, slug: &str) -> Result<Option<Article>, StoreError> {
        Ok(self.articles.iter().find(|a| a.slug == slug).cloned())
    }

    async fn article_by_id(&self, id: ArticleId) -> Result<Option<Article>, StoreError> {
        Ok(self.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn related_articles(
        &self,
        id: ArticleId,
        limit: u32,
    ) -> Result<Vec<Article>, StoreError> {
        Ok(rank_related(id, &self.articles, &self.links, limit as usize)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn users_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.users.get(id))
            .cloned()
            .collect())
    }

    async fn categories_for_articles(
        &self,
        ids: &[ArticleId],
    ) -> Result<Vec<(ArticleId, Category)>, StoreError> {
        let by_id: HashMap<_, _> = self.categories.iter().map(|c| (c.id, c)).collect();
        let wanted: HashSet<&ArticleId> = ids.iter().collect();

        let mut pairs: Vec<(ArticleId, Category)> = self
            .links
            .iter()
            .filter(|link| wanted.contains(&link.article_id))
            .filter_map(|link| {
                by_id
                    .get(&link.category_id)
                    .map(|category| (link.article_id, (*category).clone()))
            })
            .collect();
        pairs.sort_by_key(|(article_id, category)| (*article_id, category.id));
        Ok(pairs)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pressroom_core::CategoryId;

    use super::*;

    fn store() -> MemoryStore {
        let article = |id: i32, day: u32, title: &str, featured: bool| Article {
            id: ArticleId::new(id),
            title: title.to_owned(),
            slug: format!("article-{id}"),
            excerpt: format!("Excerpt {id}"),
            content: format!("<p>Body {id}</p>"),
            featured_image_url: String::new(),
            reading_time: 4,
            author_id: UserId::new(1),
            published_at: Utc.with_ymd_and_hms(2023, 5, day, 0, 0, 0).unwrap(),
            is_featured: featured,
        };
        let category = |id: i32, name: &str| Category {
            id: CategoryId::new(id),
            name: name.to_owned(),
            slug: name.to_lowercase(),
        };
        let link = |a: i32, c: i32| ArticleCategory {
            article_id: ArticleId::new(a),
            category_id: CategoryId::new(c),
        };

        MemoryStore::new(SeedRecords {
            users: vec![],
            categories: vec![category(1, "Tutorials"), category(2, "Automation")],
            articles: vec![
                article(1, 1, "Oldest Automation Guide", false),
                article(2, 20, "Newest", true),
                article(3, 10, "Middle automation", true),
                article(4, 10, "Middle twin", false),
            ],
            article_categories: vec![link(1, 2), link(3, 2), link(3, 1), link(4, 1)],
        })
    }

    fn ids(articles: &[Article]) -> Vec<i32> {
        articles.iter().map(|a| a.id.as_i32()).collect()
    }

    #[tokio::test]
    async fn test_articles_sorted_newest_first_with_stable_ties() {
        let all = store().articles(&ArticleQuery::default()).await.unwrap();
        assert_eq!(ids(&all), vec![2, 3, 4, 1]);
    }

    #[tokio::test]
    async fn test_articles_offset_and_limit() {
        let query = ArticleQuery {
            limit: Some(2),
            offset: 1,
            ..ArticleQuery::default()
        };
        assert_eq!(ids(&store().articles(&query).await.unwrap()), vec![3, 4]);

        let past_end = ArticleQuery {
            limit: Some(2),
            offset: 10,
            ..ArticleQuery::default()
        };
        assert!(store().articles(&past_end).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_category_and_search_compose() {
        let store = store();
        let filter = ArticleFilter::new(Some(CategoryId::new(2)), Some("AUTOMATION"));
        let query = ArticleQuery {
            filter: filter.clone(),
            ..ArticleQuery::default()
        };

        assert_eq!(ids(&store.articles(&query).await.unwrap()), vec![3, 1]);
        assert_eq!(store.count_articles(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_categories_sorted_by_name() {
        let names: Vec<String> = store()
            .categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Automation", "Tutorials"]);
    }

    #[tokio::test]
    async fn test_featured_newest_first() {
        let featured = store().featured_articles().await.unwrap();
        assert_eq!(ids(&featured), vec![2, 3]);
    }

    #[tokio::test]
    async fn test_categories_for_articles_ordered() {
        let pairs = store()
            .categories_for_articles(&[ArticleId::new(3), ArticleId::new(1)])
            .await
            .unwrap();
        let flat: Vec<(i32, i32)> = pairs
            .iter()
            .map(|(a, c)| (a.as_i32(), c.id.as_i32()))
            .collect();
        assert_eq!(flat, vec![(1, 2), (3, 1), (3, 2)]);
    }

    #[tokio::test]
    async fn test_related_uses_shared_categories() {
        let related = store()
            .related_articles(ArticleId::new(3), 5)
            .await
            .unwrap();
        assert_eq!(ids(&related), vec![4, 1]);
    }
}
