use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::{ApiError, AppState};
use crate::store::components::djia_components;
use crate::store::{
    ComponentRef, HistoryPoint, HistoryPointInput, NewsItem, NewsItemInput, Quote, QuoteInput,
    DEFAULT_HISTORY_LIMIT, DEFAULT_NEWS_LIMIT,
};

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Axum rejects malformed bodies with 422 by default; the dashboard API
/// reports every schema failure as 400.
fn require_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
    }
}

/// Same contract for the query string: a malformed `limit` renders as the
/// uniform JSON error body, not axum's plain-text rejection.
fn limit_or(
    query: Result<Query<LimitQuery>, QueryRejection>,
    default: usize,
) -> Result<usize, ApiError> {
    match query {
        Ok(Query(query)) => Ok(query.limit.unwrap_or(default)),
        Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
    }
}

pub async fn list_stocks(State(state): State<AppState>) -> Result<Json<Vec<Quote>>, ApiError> {
    Ok(Json(state.store.quotes().await?))
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Quote>, ApiError> {
    let symbol = symbol.to_uppercase();
    match state.store.quote(&symbol).await? {
        Some(quote) => Ok(Json(quote)),
        None => Err(ApiError::NotFound(format!("unknown symbol {symbol}"))),
    }
}

pub async fn upsert_stock(
    State(state): State<AppState>,
    body: Result<Json<QuoteInput>, JsonRejection>,
) -> Result<Json<Quote>, ApiError> {
    let input = require_body(body)?;
    Ok(Json(state.store.upsert_quote(input).await?))
}

pub async fn list_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<HistoryPoint>>, ApiError> {
    let symbol = symbol.to_uppercase();
    let limit = limit_or(query, DEFAULT_HISTORY_LIMIT)?;
    Ok(Json(state.store.history(&symbol, limit).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryBody {
    /// Ignored; the path symbol wins.
    #[serde(default)]
    pub symbol: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    #[serde(default)]
    pub volume: Option<u64>,
}

pub async fn append_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    body: Result<Json<HistoryBody>, JsonRejection>,
) -> Result<Json<HistoryPoint>, ApiError> {
    let body = require_body(body)?;
    let input = HistoryPointInput {
        symbol: symbol.to_uppercase(),
        timestamp: body.timestamp,
        price: body.price,
        volume: body.volume,
    };
    Ok(Json(state.store.append_history(input).await?))
}

pub async fn list_news(
    State(state): State<AppState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    let limit = limit_or(query, DEFAULT_NEWS_LIMIT)?;
    Ok(Json(state.store.news(limit).await?))
}

pub async fn append_news(
    State(state): State<AppState>,
    body: Result<Json<NewsItemInput>, JsonRejection>,
) -> Result<Json<NewsItem>, ApiError> {
    let input = require_body(body)?;
    Ok(Json(state.store.append_news(input).await?))
}

/// Fetches the aggregate index quote from the external provider and persists
/// it before responding, so later store reads see the same record.
pub async fn aggregate_quote(State(state): State<AppState>) -> Result<Json<Quote>, ApiError> {
    let input = state.source.fetch_aggregate().await?;
    let stored = state.store.upsert_quote(input).await?;
    info!(symbol = %stored.symbol, price = stored.price, "refreshed aggregate quote");
    Ok(Json(stored))
}

pub async fn list_components() -> Json<Vec<ComponentRef>> {
    Json(djia_components())
}
