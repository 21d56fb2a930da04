use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Latest known snapshot for one symbol. Identity is the symbol; the id is an
/// opaque handle that survives upserts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: Option<String>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub year_high: Option<f64>,
    pub year_low: Option<f64>,
    pub last_updated: DateTime<Utc>,
}

/// Quote as submitted by callers. Required fields are non-optional so a
/// missing or ill-typed field fails deserialization before it reaches the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInput {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    #[serde(default)]
    pub market_cap: Option<String>,
    #[serde(default)]
    pub day_high: Option<f64>,
    #[serde(default)]
    pub day_low: Option<f64>,
    #[serde(default)]
    pub year_high: Option<f64>,
    #[serde(default)]
    pub year_low: Option<f64>,
}

/// One retained price observation. Append-only; duplicate timestamps are
/// allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub id: Uuid,
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPointInput {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    #[serde(default)]
    pub volume: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: Uuid,
    pub headline: String,
    pub summary: Option<String>,
    pub source: Option<String>,
    pub published_at: DateTime<Utc>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItemInput {
    pub headline: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Static symbol/name pair for an index constituent. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    pub symbol: String,
    pub name: String,
}

impl QuoteInput {
    /// Symbol normalization + semantic checks shared by every write path.
    pub fn validate(&self) -> StoreResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(StoreError::Validation {
                field: "symbol",
                reason: "must not be empty".into(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(StoreError::Validation {
                field: "name",
                reason: "must not be empty".into(),
            });
        }
        for (field, value) in [
            ("price", self.price),
            ("change", self.change),
            ("changePercent", self.change_percent),
        ] {
            if !value.is_finite() {
                return Err(StoreError::Validation {
                    field,
                    reason: format!("{value} is not a finite number"),
                });
            }
        }
        Ok(())
    }
}

impl HistoryPointInput {
    pub fn validate(&self) -> StoreResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(StoreError::Validation {
                field: "symbol",
                reason: "must not be empty".into(),
            });
        }
        if !self.price.is_finite() {
            return Err(StoreError::Validation {
                field: "price",
                reason: format!("{} is not a finite number", self.price),
            });
        }
        Ok(())
    }
}

impl NewsItemInput {
    pub fn validate(&self) -> StoreResult<()> {
        if self.headline.trim().is_empty() {
            return Err(StoreError::Validation {
                field: "headline",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
