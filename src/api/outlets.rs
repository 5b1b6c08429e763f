//! Media outlet API endpoints
//!
//! - GET /api/v1/outlets - Outlets for the curation form, most-covered
//!   first, with display names derived from their URLs

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::{ApiError, AppState};
use crate::models::MediaOutlet;

/// Outlet with its derived display name
#[derive(Debug, Serialize)]
pub struct OutletResponse {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
    pub article_count: i64,
    pub ideology: Option<i32>,
    pub info: String,
}

impl From<MediaOutlet> for OutletResponse {
    fn from(outlet: MediaOutlet) -> Self {
        Self {
            name: outlet.display_name(),
            id: outlet.id,
            url: outlet.url,
            description: outlet.description,
            article_count: outlet.article_count,
            ideology: outlet.ideology,
            info: outlet.info,
        }
    }
}

/// GET /api/v1/outlets
pub async fn list_outlets(
    State(state): State<AppState>,
) -> Result<Json<Vec<OutletResponse>>, ApiError> {
    let outlets = state.curation_service.list_outlets().await?;
    Ok(Json(outlets.into_iter().map(OutletResponse::from).collect()))
}
