pub mod alpha_vantage;

pub use alpha_vantage::AlphaVantageSource;

use async_trait::async_trait;

use crate::store::QuoteInput;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("provider response is missing the quote object")]
    MissingQuote,
    #[error("provider field {field} is malformed: {value:?}")]
    MalformedField { field: &'static str, value: String },
}

/// External provider of the aggregate index quote. The adapter only fetches;
/// persisting the result into the store is the API layer's job.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_aggregate(&self) -> Result<QuoteInput, UpstreamError>;
}
