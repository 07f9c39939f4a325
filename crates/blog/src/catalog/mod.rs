//! Article retrieval and relevance engine.
//!
//! [`Catalog`] sits between the HTTP routes and a [`BlogStore`]. It resolves
//! category slugs into filters, pages through results, and enriches every
//! returned article with its author and categories.

pub mod pagination;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use pressroom_core::{Article, ArticleId, ArticleWithDetails, Category, User};
use thiserror::Error;
use tracing::instrument;

use crate::store::{ArticleFilter, ArticleQuery, BlogStore, StoreError};

pub use pagination::{ArticlePage, PageRequest, Pagination};

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The named kind of record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a category filter does when its slug matches no category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownCategoryPolicy {
    /// Match nothing: empty listings and a zero count.
    #[default]
    Empty,
    /// Ignore the category filter entirely.
    Unfiltered,
}

impl FromStr for UnknownCategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "unfiltered" => Ok(Self::Unfiltered),
            other => Err(format!("expected `empty` or `unfiltered`, got `{other}`")),
        }
    }
}

impl fmt::Display for UnknownCategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Unfiltered => "unfiltered",
        })
    }
}

/// Read-side view of the blog.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn BlogStore>,
    unknown_category: UnknownCategoryPolicy,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("unknown_category", &self.unknown_category)
            .finish_non_exhaustive()
    }
}

impl Catalog {
    #[must_use]
    pub fn new(store: Arc<dyn BlogStore>, unknown_category: UnknownCategoryPolicy) -> Self {
        Self {
            store,
            unknown_category,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn BlogStore> {
        &self.store
    }

    /// All categories, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the store fails.
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.store.categories().await?)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown slug.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Category, CatalogError> {
        self.store
            .category_by_slug(slug)
            .await?
            .ok_or(CatalogError::NotFound("Category"))
    }

    /// List enriched articles, newest first.
    ///
    /// Blank `category` and `search` values are ignored. `limit` of `None`
    /// returns every match from `offset` on.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the store fails.
    #[instrument(skip(self))]
    pub async fn list_articles(
        &self,
        limit: Option<u32>,
        offset: u32,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<ArticleWithDetails>, CatalogError> {
        let Some(filter) = self.resolve_filter(category, search).await? else {
            return Ok(Vec::new());
        };
        let articles = self
            .store
            .articles(&ArticleQuery {
                filter,
                limit,
                offset,
            })
            .await?;
        self.enrich(articles).await
    }

    /// Count the articles [`list_articles`](Self::list_articles) would return
    /// without a limit.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the store fails.
    #[instrument(skip(self))]
    pub async fn count_articles(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<u64, CatalogError> {
        match self.resolve_filter(category, search).await? {
            Some(filter) => Ok(self.store.count_articles(&filter).await?),
            None => Ok(0),
        }
    }

    /// One page of articles with pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the store fails.
    pub async fn page(
        &self,
        request: PageRequest,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<ArticlePage, CatalogError> {
        let articles = self
            .list_articles(Some(request.limit), request.offset(), category, search)
            .await?;
        let total = self.count_articles(category, search).await?;

        Ok(ArticlePage {
            articles,
            pagination: Pagination::new(request, total),
        })
    }

    /// Featured articles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the store fails.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<ArticleWithDetails>, CatalogError> {
        let articles = self.store.featured_articles().await?;
        self.enrich(articles).await
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown slug.
    #[instrument(skip(self))]
    pub async fn article_by_slug(&self, slug: &str) -> Result<ArticleWithDetails, CatalogError> {
        let article = self.find_by_slug(slug).await?;
        self.enrich_one(article).await
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown id.
    #[instrument(skip(self))]
    pub async fn article_by_id(&self, id: ArticleId) -> Result<ArticleWithDetails, CatalogError> {
        let article = self
            .store
            .article_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound("Article"))?;
        self.enrich_one(article).await
    }

    /// Articles related to `id`, best match first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the store fails.
    #[instrument(skip(self))]
    pub async fn related(
        &self,
        id: ArticleId,
        limit: u32,
    ) -> Result<Vec<ArticleWithDetails>, CatalogError> {
        let articles = self.store.related_articles(id, limit).await?;
        self.enrich(articles).await
    }

    /// Articles related to the article at `slug`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no article has `slug`.
    pub async fn related_by_slug(
        &self,
        slug: &str,
        limit: u32,
    ) -> Result<Vec<ArticleWithDetails>, CatalogError> {
        let source = self.find_by_slug(slug).await?;
        self.related(source.id, limit).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Article, CatalogError> {
        self.store
            .article_by_slug(slug)
            .await?
            .ok_or(CatalogError::NotFound("Article"))
    }

    /// Turn raw parameters into a store filter.
    ///
    /// `None` means the request can match nothing.
    async fn resolve_filter(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Option<ArticleFilter>, CatalogError> {
        let slug = category.map(str::trim).filter(|slug| !slug.is_empty());

        let category_id = match slug {
            None => None,
            Some(slug) => match self.store.category_by_slug(slug).await? {
                Some(category) => Some(category.id),
                None => match self.unknown_category {
                    UnknownCategoryPolicy::Empty => return Ok(None),
                    UnknownCategoryPolicy::Unfiltered => None,
                },
            },
        };

        Ok(Some(ArticleFilter::new(category_id, search)))
    }

    async fn enrich_one(&self, article: Article) -> Result<ArticleWithDetails, CatalogError> {
        self.enrich(vec![article])
            .await?
            .pop()
            .ok_or(CatalogError::NotFound("Article"))
    }

    /// Attach authors and categories, preserving order.
    ///
    /// Authors that cannot be found are replaced by [`User::unknown`].
    async fn enrich(
        &self,
        articles: Vec<Article>,
    ) -> Result<Vec<ArticleWithDetails>, CatalogError> {
        if articles.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<_> = articles
            .iter()
            .map(|a| a.author_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let article_ids: Vec<_> = articles.iter().map(|a| a.id).collect();

        let authors: HashMap<_, _> = self
            .store
            .users_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let mut by_article: HashMap<ArticleId, Vec<Category>> = HashMap::new();
        for (article_id, category) in self.store.categories_for_articles(&article_ids).await? {
            by_article.entry(article_id).or_default().push(category);
        }

        Ok(articles
            .into_iter()
            .map(|article| {
                let author = authors.get(&article.author_id).cloned().unwrap_or_else(|| {
                    tracing::warn!(
                        article_id = %article.id,
                        author_id = %article.author_id,
                        "Article author not found"
                    );
                    User::unknown()
                });
                let categories = by_article.remove(&article.id).unwrap_or_default();
                ArticleWithDetails {
                    article,
                    author,
                    categories,
                }
            })
            .collect())
    }
}
