//! Related-article ranking by category overlap.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use pressroom_core::{Article, ArticleCategory, ArticleId, CategoryId};

/// Rank the articles related to `source`.
///
/// Candidates are the articles other than `source` that share at least one
/// category with it. They are ordered by shared-category count descending,
/// then `published_at` descending, then id ascending, and truncated to
/// `limit`. A source without categories has no related articles.
pub fn rank_related<'a>(
    source: ArticleId,
    articles: impl IntoIterator<Item = &'a Article>,
    links: &[ArticleCategory],
    limit: usize,
) -> Vec<&'a Article> {
    let source_categories: HashSet<CategoryId> = links
        .iter()
        .filter(|link| link.article_id == source)
        .map(|link| link.category_id)
        .collect();

    if source_categories.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut shared: HashMap<ArticleId, usize> = HashMap::new();
    for link in links {
        if link.article_id != source && source_categories.contains(&link.category_id) {
            *shared.entry(link.article_id).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(usize, &Article)> = articles
        .into_iter()
        .filter_map(|article| shared.get(&article.id).map(|&count| (count, article)))
        .collect();

    ranked.sort_by_key(|(count, article)| (Reverse(*count), Reverse(article.published_at), article.id));
    ranked.truncate(limit);
    ranked.into_iter().map(|(_, article)| article).collect()
}
