pub mod handlers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::source::{QuoteSource, UpstreamError};
use crate::store::{MarketStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketStore>,
    pub source: Arc<dyn QuoteSource>,
}

impl AppState {
    pub fn new(store: Arc<dyn MarketStore>, source: Arc<dyn QuoteSource>) -> Self {
        Self { store, source }
    }
}

/// Errors crossing the handler boundary. Every variant renders as a JSON
/// `{"error": "..."}` body; nothing propagates unhandled.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("failed to fetch external data: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation { .. } => ApiError::Validation(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(err) => {
                error!(error = %err, "upstream quote fetch failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(err) => {
                error!(error = %err, "unexpected handler failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/stocks",
            get(handlers::list_stocks).post(handlers::upsert_stock),
        )
        .route("/api/stocks/:symbol", get(handlers::get_stock))
        .route(
            "/api/stocks/:symbol/history",
            get(handlers::list_history).post(handlers::append_history),
        )
        .route(
            "/api/news",
            get(handlers::list_news).post(handlers::append_news),
        )
        .route("/api/external/djia", get(handlers::aggregate_quote))
        .route("/api/djia/components", get(handlers::list_components))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
