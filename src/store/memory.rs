use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::types::{
    HistoryPoint, HistoryPointInput, NewsItem, NewsItemInput, Quote, QuoteInput, StoreResult,
};
use super::MarketStore;

/// Process-memory store: latest quote per symbol plus append-only history and
/// news lists. Everything is lost on restart.
///
/// The lock is only held for synchronous map/vec work, never across awaits,
/// so the single-writer assumption of the dashboard holds.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    quotes: HashMap<String, Quote>,
    history: Vec<HistoryPoint>,
    news: Vec<NewsItem>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn quote(&self, symbol: &str) -> StoreResult<Option<Quote>> {
        Ok(self.inner.read().quotes.get(symbol).cloned())
    }

    async fn quotes(&self) -> StoreResult<Vec<Quote>> {
        Ok(self.inner.read().quotes.values().cloned().collect())
    }

    async fn upsert_quote(&self, input: QuoteInput) -> StoreResult<Quote> {
        input.validate()?;
        let symbol = input.symbol.trim().to_uppercase();

        let mut inner = self.inner.write();
        // Identity survives the upsert; everything else is replaced.
        let id = inner
            .quotes
            .get(&symbol)
            .map(|existing| existing.id)
            .unwrap_or_else(Uuid::new_v4);

        let quote = Quote {
            id,
            symbol: symbol.clone(),
            name: input.name,
            price: input.price,
            change: input.change,
            change_percent: input.change_percent,
            volume: input.volume,
            market_cap: input.market_cap,
            day_high: input.day_high,
            day_low: input.day_low,
            year_high: input.year_high,
            year_low: input.year_low,
            last_updated: Utc::now(),
        };
        inner.quotes.insert(symbol.clone(), quote.clone());
        debug!(%symbol, price = quote.price, "upserted quote");
        Ok(quote)
    }

    async fn history(&self, symbol: &str, limit: usize) -> StoreResult<Vec<HistoryPoint>> {
        let inner = self.inner.read();
        let mut points: Vec<HistoryPoint> = inner
            .history
            .iter()
            .filter(|p| p.symbol == symbol)
            .cloned()
            .collect();
        points.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        points.truncate(limit);
        Ok(points)
    }

    async fn append_history(&self, input: HistoryPointInput) -> StoreResult<HistoryPoint> {
        input.validate()?;
        let point = HistoryPoint {
            id: Uuid::new_v4(),
            symbol: input.symbol.trim().to_uppercase(),
            timestamp: input.timestamp,
            price: input.price,
            volume: input.volume,
        };
        self.inner.write().history.push(point.clone());
        Ok(point)
    }

    async fn news(&self, limit: usize) -> StoreResult<Vec<NewsItem>> {
        let inner = self.inner.read();
        let mut items = inner.news.clone();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        items.truncate(limit);
        Ok(items)
    }

    async fn append_news(&self, input: NewsItemInput) -> StoreResult<NewsItem> {
        input.validate()?;
        let item = NewsItem {
            id: Uuid::new_v4(),
            headline: input.headline,
            summary: input.summary,
            source: input.source,
            published_at: input.published_at,
            url: input.url,
        };
        self.inner.write().news.push(item.clone());
        Ok(item)
    }
}
