//! Article route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use pressroom_core::ArticleWithDetails;
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::pagination::{DEFAULT_RELATED_LIMIT, lenient_positive};
use crate::catalog::{ArticlePage, PageRequest};
use crate::error::Result;
use crate::state::AppState;

/// Query parameters for the article listing.
///
/// Kept as raw strings so malformed numbers fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Query parameters for related articles.
#[derive(Debug, Default, Deserialize)]
pub struct RelatedParams {
    pub limit: Option<String>,
}

/// `GET /api/articles`
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ArticlePage>> {
    let request = PageRequest::parse(params.page.as_deref(), params.limit.as_deref());
    let page = state
        .catalog()
        .page(request, params.category.as_deref(), params.search.as_deref())
        .await?;
    Ok(Json(page))
}

/// `GET /api/articles/featured`
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<ArticleWithDetails>>> {
    Ok(Json(state.catalog().featured().await?))
}

/// `GET /api/articles/{slug}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleWithDetails>> {
    Ok(Json(state.catalog().article_by_slug(&slug).await?))
}

/// `GET /api/articles/{slug}/related`
#[instrument(skip(state))]
pub async fn related(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<Vec<ArticleWithDetails>>> {
    let limit = lenient_positive(params.limit.as_deref(), DEFAULT_RELATED_LIMIT, true);
    Ok(Json(state.catalog().related_by_slug(&slug, limit).await?))
}
