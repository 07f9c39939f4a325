//! Seed document for populating a blog store.
//!
//! A seed is a YAML file listing users, categories, and articles. Articles
//! reference their author by username and their categories by slug:
//!
//! ```yaml
//! users:
//!   - username: sarah.johnson
//!     password: password123
//!     fullName: Sarah Johnson
//! categories:
//!   - name: Automation
//!     slug: automation
//! articles:
//!   - title: Automate Your Reports
//!     slug: automate-your-reports
//!     excerpt: Save hours every week.
//!     content: <p>Hello</p>
//!     featuredImageUrl: https://example.com/cover.jpg
//!     readingTime: 8
//!     author: sarah.johnson
//!     publishedAt: 2023-05-15T00:00:00Z
//!     featured: true
//!     categories: [automation]
//! ```
//!
//! [`SeedDocument::materialize`] resolves those references and assigns
//! sequential ids (starting at 1, in document order) so every backend ends up
//! with the same records.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Article, ArticleCategory, Category, User};
use crate::types::{ArticleId, CategoryId, Slug, SlugError, UserId};

/// Errors raised while loading or resolving a seed document.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate username: {0}")]
    DuplicateUsername(String),
    #[error("duplicate category {field}: {value}")]
    DuplicateCategory { field: &'static str, value: String },
    #[error("duplicate article slug: {0}")]
    DuplicateArticle(String),
    #[error("invalid slug {slug:?}: {source}")]
    InvalidSlug {
        slug: String,
        #[source]
        source: SlugError,
    },
    #[error("article {article} references unknown author {username}")]
    UnknownAuthor { article: String, username: String },
    #[error("article {article} references unknown category {slug}")]
    UnknownCategory { article: String, slug: String },
}

/// A user entry in the seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A category entry in the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub slug: String,
}

/// An article entry in the seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedArticle {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image_url: String,
    pub reading_time: i32,
    /// Username of the author.
    pub author: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub featured: bool,
    /// Category slugs.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Parsed seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub articles: Vec<SeedArticle>,
}

/// Fully resolved records ready to be loaded into a store.
#[derive(Debug, Clone, Default)]
pub struct SeedRecords {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub articles: Vec<Article>,
    pub article_categories: Vec<ArticleCategory>,
}

impl SeedDocument {
    /// Parse a seed document from YAML.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Parse` if the YAML does not match the seed schema.
    pub fn from_yaml(yaml: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Resolve author and category references and assign ids.
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate usernames, category names or slugs,
    /// article slugs, malformed slugs, or dangling references.
    pub fn materialize(&self) -> Result<SeedRecords, SeedError> {
        let mut records = SeedRecords::default();

        let mut users_by_name: HashMap<&str, UserId> = HashMap::new();
        for (id, user) in (1..).zip(&self.users) {
            let id = UserId::new(id);
            if users_by_name.insert(&user.username, id).is_some() {
                return Err(SeedError::DuplicateUsername(user.username.clone()));
            }
            records.users.push(User {
                id,
                username: user.username.clone(),
                password: user.password.clone(),
                full_name: user.full_name.clone(),
                bio: user.bio.clone(),
                avatar_url: user.avatar_url.clone(),
            });
        }

        let mut categories_by_slug: HashMap<&str, CategoryId> = HashMap::new();
        let mut category_names: HashSet<&str> = HashSet::new();
        for (id, category) in (1..).zip(&self.categories) {
            let id = CategoryId::new(id);
            check_slug(&category.slug)?;
            if !category_names.insert(&category.name) {
                return Err(SeedError::DuplicateCategory {
                    field: "name",
                    value: category.name.clone(),
                });
            }
            if categories_by_slug.insert(&category.slug, id).is_some() {
                return Err(SeedError::DuplicateCategory {
                    field: "slug",
                    value: category.slug.clone(),
                });
            }
            records.categories.push(Category {
                id,
                name: category.name.clone(),
                slug: category.slug.clone(),
            });
        }

        let mut article_slugs: HashSet<&str> = HashSet::new();
        for (id, article) in (1..).zip(&self.articles) {
            let id = ArticleId::new(id);
            check_slug(&article.slug)?;
            if !article_slugs.insert(&article.slug) {
                return Err(SeedError::DuplicateArticle(article.slug.clone()));
            }

            let author_id = *users_by_name.get(article.author.as_str()).ok_or_else(|| {
                SeedError::UnknownAuthor {
                    article: article.slug.clone(),
                    username: article.author.clone(),
                }
            })?;

            let mut linked = HashSet::new();
            for slug in &article.categories {
                let category_id = *categories_by_slug.get(slug.as_str()).ok_or_else(|| {
                    SeedError::UnknownCategory {
                        article: article.slug.clone(),
                        slug: slug.clone(),
                    }
                })?;
                // Repeating a category in one article is harmless; link it once.
                if linked.insert(category_id) {
                    records.article_categories.push(ArticleCategory {
                        article_id: id,
                        category_id,
                    });
                }
            }

            records.articles.push(Article {
                id,
                title: article.title.clone(),
                slug: article.slug.clone(),
                excerpt: article.excerpt.clone(),
                content: article.content.clone(),
                featured_image_url: article.featured_image_url.clone(),
                reading_time: article.reading_time,
                author_id,
                published_at: article.published_at,
                is_featured: article.featured,
            });
        }

        Ok(records)
    }
}

fn check_slug(slug: &str) -> Result<(), SeedError> {
    Slug::parse(slug)
        .map(drop)
        .map_err(|source| SeedError::InvalidSlug {
            slug: slug.to_owned(),
            source,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SEED: &str = r"
users:
  - username: sarah.johnson
    password: password123
    fullName: Sarah Johnson
    bio: Senior Writer
  - username: michael.torres
    password: password123
    fullName: Michael Torres
categories:
  - name: Automation
    slug: automation
  - name: Tutorials
    slug: tutorials
articles:
  - title: First
    slug: first
    excerpt: one
    content: <p>one</p>
    featuredImageUrl: https://example.com/1.jpg
    readingTime: 5
    author: michael.torres
    publishedAt: 2023-05-15T00:00:00Z
    featured: true
    categories: [automation, tutorials, automation]
  - title: Second
    slug: second
    excerpt: two
    content: <p>two</p>
    featuredImageUrl: https://example.com/2.jpg
    readingTime: 3
    author: sarah.johnson
    publishedAt: 2023-05-01T00:00:00Z
";

    #[test]
    fn test_materialize_assigns_ids_and_resolves_references() {
        let records = SeedDocument::from_yaml(SEED).unwrap().materialize().unwrap();

        assert_eq!(records.users.len(), 2);
        assert_eq!(records.users[1].id, UserId::new(2));
        assert_eq!(records.categories[1].id, CategoryId::new(2));

        let first = &records.articles[0];
        assert_eq!(first.id, ArticleId::new(1));
        assert_eq!(first.author_id, UserId::new(2));
        assert!(first.is_featured);
        assert!(!records.articles[1].is_featured);

        assert_eq!(
            records.article_categories,
            vec![
                ArticleCategory {
                    article_id: ArticleId::new(1),
                    category_id: CategoryId::new(1),
                },
                ArticleCategory {
                    article_id: ArticleId::new(1),
                    category_id: CategoryId::new(2),
                },
            ]
        );
    }

    #[test]
    fn test_unknown_author_is_rejected() {
        let yaml = SEED.replace("author: sarah.johnson", "author: nobody");
        let err = SeedDocument::from_yaml(&yaml).unwrap().materialize().unwrap_err();
        assert!(matches!(err, SeedError::UnknownAuthor { ref username, .. } if username == "nobody"));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let yaml = SEED.replace("[automation, tutorials, automation]", "[recipes]");
        let err = SeedDocument::from_yaml(&yaml).unwrap().materialize().unwrap_err();
        assert!(matches!(err, SeedError::UnknownCategory { ref slug, .. } if slug == "recipes"));
    }

    #[test]
    fn test_duplicate_article_slug_is_rejected() {
        let yaml = SEED.replace("slug: second", "slug: first");
        let err = SeedDocument::from_yaml(&yaml).unwrap().materialize().unwrap_err();
        assert!(matches!(err, SeedError::DuplicateArticle(ref s) if s == "first"));
    }

    #[test]
    fn test_invalid_slug_is_rejected() {
        let yaml = SEED.replace("slug: tutorials", "slug: Tutorials");
        let err = SeedDocument::from_yaml(&yaml).unwrap().materialize().unwrap_err();
        assert!(matches!(err, SeedError::InvalidSlug { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            SeedDocument::from_yaml("users: 12"),
            Err(SeedError::Parse(_))
        ));
    }
}
