//! Feed API endpoints
//!
//! - GET /api/v1/feed - General paged feed
//! - GET /api/v1/feed/live - Snapshot of the polled default view
//! - GET /api/v1/feed/bias - Issues with one-sided coverage
//! - GET /api/v1/feed/controversial - Issues with evenly split coverage

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::{ApiError, AppState};
use crate::models::Category;
use crate::services::feed::{FeedKind, FeedPage, FeedQuery, FeedState};

/// Query parameters shared by the feed endpoints
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    /// Korean section label
    pub category: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
    pub search: Option<String>,
}

fn default_page() -> usize {
    1
}

impl FeedParams {
    /// Resolve the category parameter
    ///
    /// `fallback` supplies the section the bias and controversial feeds
    /// default to; the general feed passes `None` and spans all sections.
    fn category(&self, fallback: Option<Category>) -> Result<Option<Category>, ApiError> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => Ok(fallback),
            Some(label) => Category::from_str(label)
                .map(Some)
                .ok_or_else(|| ApiError::validation_error(format!("unknown category '{label}'"))),
        }
    }

    fn into_query(self, kind: FeedKind, fallback: Option<Category>) -> Result<FeedQuery, ApiError> {
        let category = self.category(fallback)?;
        Ok(FeedQuery {
            kind,
            category,
            page: self.page,
            search: self.search,
        })
    }
}

/// GET /api/v1/feed
pub async fn get_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedPage>, ApiError> {
    let query = params.into_query(FeedKind::General, None)?;
    let page = state.feed_service.assemble(&query).await?;
    Ok(Json(page))
}

/// GET /api/v1/feed/live
///
/// Serves the scheduled default view's current state without triggering
/// an assembly; the client polls this while the background task refreshes.
pub async fn get_live_feed(State(state): State<AppState>) -> Json<FeedState> {
    Json(state.default_view.state().await)
}

/// GET /api/v1/feed/bias
pub async fn get_bias_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedPage>, ApiError> {
    let query = params.into_query(FeedKind::Bias, Some(Category::Politics))?;
    let page = state.feed_service.assemble(&query).await?;
    Ok(Json(page))
}

/// GET /api/v1/feed/controversial
pub async fn get_controversial_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedPage>, ApiError> {
    let query = params.into_query(FeedKind::Controversial, Some(Category::Politics))?;
    let page = state.feed_service.assemble(&query).await?;
    Ok(Json(page))
}
