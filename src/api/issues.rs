//! Issue API endpoints
//!
//! - GET /api/v1/issues/{id} - Full issue view with summaries, the
//!   ordered member articles and a distribution over their scores

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::{ApiError, AppState};
use crate::services::feed::IssueDetail;

/// GET /api/v1/issues/{id}
pub async fn get_issue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IssueDetail>, ApiError> {
    let detail = state.feed_service.issue_detail(&id).await?;
    Ok(Json(detail))
}
