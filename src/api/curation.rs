//! Curation API endpoints
//!
//! - POST /api/v1/articles - Insert an admin-curated article

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::api::{ApiError, AppState};
use crate::services::curation::CreateArticleInput;

/// Response for a successful insert
#[derive(Debug, Serialize)]
pub struct CreateArticleResponse {
    pub id: String,
}

/// POST /api/v1/articles
pub async fn create_article(
    State(state): State<AppState>,
    Json(input): Json<CreateArticleInput>,
) -> Result<(StatusCode, Json<CreateArticleResponse>), ApiError> {
    let id = state.curation_service.create_article(input).await?;
    Ok((StatusCode::CREATED, Json(CreateArticleResponse { id })))
}
