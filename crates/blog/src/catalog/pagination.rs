//! Page parameters for article listings.

use pressroom_core::ArticleWithDetails;
use serde::Serialize;

/// Page used when none (or an invalid one) is requested.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when none (or an invalid one) is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 9;
/// Number of related articles returned by default.
pub const DEFAULT_RELATED_LIMIT: u32 = 3;
/// Upper bound on any requested page size or related limit.
pub const MAX_LIMIT: u32 = 100;

/// Parse a positive integer query parameter.
///
/// Missing, unparsable, zero, and negative values all yield `default`.
/// Values above [`MAX_LIMIT`] are clamped when `cap` is set.
#[must_use]
pub fn lenient_positive(raw: Option<&str>, default: u32, cap: bool) -> u32 {
    let value = raw
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&n| n > 0)
        .map_or(default, |n| u32::try_from(n).unwrap_or(u32::MAX));

    if cap { value.min(MAX_LIMIT) } else { value }
}

/// A validated page request. `page` and `limit` are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request from raw query-string values.
    #[must_use]
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: lenient_positive(page, DEFAULT_PAGE, false),
            limit: lenient_positive(limit, DEFAULT_PAGE_SIZE, true),
        }
    }

    /// Number of articles before this page, saturating on overflow.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Pagination metadata returned alongside a page of articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
    pub limit: u32,
}

impl Pagination {
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            total,
            page: request.page,
            total_pages: total.div_ceil(u64::from(request.limit.max(1))),
            limit: request.limit,
        }
    }
}

/// One page of enriched articles.
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage {
    pub articles: Vec<ArticleWithDetails>,
    pub pagination: Pagination,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_positive_falls_back() {
        assert_eq!(lenient_positive(None, 9, true), 9);
        assert_eq!(lenient_positive(Some("abc"), 9, true), 9);
        assert_eq!(lenient_positive(Some("0"), 9, true), 9);
        assert_eq!(lenient_positive(Some("-4"), 9, true), 9);
        assert_eq!(lenient_positive(Some("2.5"), 9, true), 9);
        assert_eq!(lenient_positive(Some(" 4 "), 9, true), 4);
    }

    #[test]
    fn test_lenient_positive_caps_only_when_asked() {
        assert_eq!(lenient_positive(Some("500"), 9, true), MAX_LIMIT);
        assert_eq!(lenient_positive(Some("500"), 1, false), 500);
        assert_eq!(lenient_positive(Some("99999999999"), 1, false), u32::MAX);
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::parse(Some("3"), Some("4"));
        assert_eq!(request, PageRequest { page: 3, limit: 4 });
        assert_eq!(request.offset(), 8);
        assert_eq!(PageRequest::default().offset(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest { page: 1, limit: 4 };
        assert_eq!(Pagination::new(request, 0).total_pages, 0);
        assert_eq!(Pagination::new(request, 4).total_pages, 1);
        assert_eq!(Pagination::new(request, 5).total_pages, 2);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(PageRequest::default(), 10)).unwrap();
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["limit"], 9);
    }
}
