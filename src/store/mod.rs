pub mod components; // fixed DJIA constituent list
pub mod memory;     // in-memory implementation
pub mod seed;       // synthetic startup data
pub mod types;

pub use types::*;

use async_trait::async_trait;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_NEWS_LIMIT: usize = 10;

/// Storage capability consumed by the API layer. One in-memory implementation
/// exists today; a durable backend can satisfy the same contract without the
/// handlers changing.
#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Latest quote for a symbol, if one has been stored.
    async fn quote(&self, symbol: &str) -> StoreResult<Option<Quote>>;

    /// All stored quotes. Iteration order carries no meaning.
    async fn quotes(&self) -> StoreResult<Vec<Quote>>;

    /// Full-replace upsert keyed by symbol. An existing record keeps its id;
    /// every other field is overwritten and `last_updated` is stamped.
    async fn upsert_quote(&self, input: QuoteInput) -> StoreResult<Quote>;

    /// Price observations for a symbol, newest first, at most `limit`.
    async fn history(&self, symbol: &str, limit: usize) -> StoreResult<Vec<HistoryPoint>>;

    /// Appends one observation. No dedup; duplicate timestamps are fine.
    async fn append_history(&self, input: HistoryPointInput) -> StoreResult<HistoryPoint>;

    /// News items, newest first, at most `limit`.
    async fn news(&self, limit: usize) -> StoreResult<Vec<NewsItem>>;

    async fn append_news(&self, input: NewsItemInput) -> StoreResult<NewsItem>;
}
