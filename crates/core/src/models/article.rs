//! Article models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, User};
use crate::types::{ArticleId, CategoryId, UserId};

/// A published article as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// Article body as HTML.
    pub content: String,
    pub featured_image_url: String,
    /// Estimated reading time in minutes.
    pub reading_time: i32,
    pub author_id: UserId,
    pub published_at: DateTime<Utc>,
    pub is_featured: bool,
}

impl Article {
    /// Case-insensitive substring match against title, excerpt, and content.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.title, &self.excerpt, &self.content]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Link between an article and one of its categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ArticleCategory {
    pub article_id: ArticleId,
    pub category_id: CategoryId,
}

/// An article joined with its resolved author and categories.
///
/// Serializes flat: the article fields plus `author` and `categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleWithDetails {
    #[serde(flatten)]
    pub article: Article,
    pub author: User,
    pub categories: Vec<Category>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn article() -> Article {
        Article {
            id: ArticleId::new(3),
            title: "How Acme Corp Cut Reporting Time".to_owned(),
            slug: "how-acme-corp-cut-reporting-time".to_owned(),
            excerpt: "A case study.".to_owned(),
            content: "<p>Weekly reports took 30 hours.</p>".to_owned(),
            featured_image_url: "https://example.com/acme.jpg".to_owned(),
            reading_time: 12,
            author_id: UserId::new(2),
            published_at: Utc.with_ymd_and_hms(2023, 4, 25, 0, 0, 0).unwrap(),
            is_featured: false,
        }
    }

    #[test]
    fn test_matches_any_field() {
        let a = article();
        assert!(a.matches_lowercase("acme"));
        assert!(a.matches_lowercase("case study"));
        assert!(a.matches_lowercase("30 hours"));
        assert!(!a.matches_lowercase("trello"));
    }

    #[test]
    fn test_details_serialize_flat_camel_case() {
        let details = ArticleWithDetails {
            article: article(),
            author: User::unknown(),
            categories: vec![Category {
                id: CategoryId::new(4),
                name: "Case Studies".to_owned(),
                slug: "case-studies".to_owned(),
            }],
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["readingTime"], 12);
        assert_eq!(json["authorId"], 2);
        assert_eq!(json["isFeatured"], false);
        assert_eq!(json["featuredImageUrl"], "https://example.com/acme.jpg");
        assert_eq!(json["publishedAt"], "2023-04-25T00:00:00Z");
        assert_eq!(json["author"]["fullName"], "Unknown Author");
        assert_eq!(json["categories"][0]["slug"], "case-studies");
    }
}
