//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the service:
//! - Feed endpoints (general, bias, controversial, live snapshot)
//! - Issue detail endpoint
//! - Media outlet listing
//! - Curation endpoint (article insert)

pub mod curation;
pub mod feed;
pub mod issues;
pub mod outlets;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::datastore::StoreError;
use crate::services::curation::{CurationError, CurationService};
use crate::services::feed::{FeedError, FeedService, FeedView};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub feed_service: Arc<FeedService>,
    pub curation_service: Arc<CurationService>,
    /// Continuously refreshed default feed, served without reassembly
    pub default_view: Arc<FeedView>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn upstream_error(message: impl Into<String>) -> Self {
        Self::new("UPSTREAM_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "UPSTREAM_ERROR" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::not_found(what),
            other => {
                tracing::error!(error = %other, "store request failed");
                ApiError::upstream_error("news store unavailable")
            }
        }
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Store(e) => e.into(),
        }
    }
}

impl From<CurationError> for ApiError {
    fn from(err: CurationError) -> Self {
        match err {
            CurationError::Validation(message) => ApiError::validation_error(message),
            CurationError::Store(e) => e.into(),
        }
    }
}

/// Build the main API router
fn build_api_router() -> Router<AppState> {
    Router::new()
        .route("/feed", get(feed::get_feed))
        .route("/feed/live", get(feed::get_live_feed))
        .route("/feed/bias", get(feed::get_bias_feed))
        .route("/feed/controversial", get(feed::get_controversial_feed))
        .route("/issues/{id}", get(issues::get_issue))
        .route("/outlets", get(outlets::list_outlets))
        .route("/articles", post(curation::create_article))
}

/// Build the application router
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = match cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => {
            tracing::warn!(cors_origin, "invalid CORS origin, allowing none");
            CorsLayer::new()
        }
    };

    Router::new()
        .nest("/api/v1", build_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
