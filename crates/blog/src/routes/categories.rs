//! Category route handlers.

use axum::{Json, extract::State};
use pressroom_core::Category;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// `GET /api/categories`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.catalog().categories().await?))
}
