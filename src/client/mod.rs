pub mod cache;
pub mod poller;

pub use cache::{FetchOutcome, ResponseCache};
pub use poller::Poller;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::store::{ComponentRef, HistoryPoint, NewsItem, Quote};

/// How often dashboard views re-poll quote endpoints. History, news and
/// components are fetched once per view mount.
pub const QUOTE_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Typed client for the dashboard REST surface.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("GET {path} returned HTTP {status}");
        }
        response
            .json()
            .await
            .with_context(|| format!("GET {path} returned an unexpected body"))
    }

    pub async fn aggregate_quote(&self) -> anyhow::Result<Quote> {
        self.get_json("/api/external/djia").await
    }

    pub async fn stocks(&self) -> anyhow::Result<Vec<Quote>> {
        self.get_json("/api/stocks").await
    }

    pub async fn stock(&self, symbol: &str) -> anyhow::Result<Quote> {
        self.get_json(&format!("/api/stocks/{symbol}")).await
    }

    pub async fn history(
        &self,
        symbol: &str,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<HistoryPoint>> {
        let path = match limit {
            Some(limit) => format!("/api/stocks/{symbol}/history?limit={limit}"),
            None => format!("/api/stocks/{symbol}/history"),
        };
        self.get_json(&path).await
    }

    pub async fn news(&self, limit: Option<usize>) -> anyhow::Result<Vec<NewsItem>> {
        let path = match limit {
            Some(limit) => format!("/api/news?limit={limit}"),
            None => "/api/news".to_string(),
        };
        self.get_json(&path).await
    }

    pub async fn components(&self) -> anyhow::Result<Vec<ComponentRef>> {
        self.get_json("/api/djia/components").await
    }
}

#[derive(Default)]
struct FeedState {
    quote: Option<Quote>,
    notice: Option<String>,
}

/// Polls the aggregate quote on an interval and keeps the latest value for
/// rendering. A failed poll keeps the stale quote on screen and surfaces a
/// non-blocking notice instead.
pub struct QuoteFeed {
    state: Arc<Mutex<FeedState>>,
    poller: Poller,
}

impl QuoteFeed {
    const CACHE_KEY: &'static str = "aggregate";

    pub fn start(client: Arc<DashboardClient>, period: Duration) -> Self {
        let cache: Arc<ResponseCache<Quote>> = Arc::new(ResponseCache::new());
        let state = Arc::new(Mutex::new(FeedState::default()));

        let poll_state = state.clone();
        let poller = Poller::spawn(period, move || {
            let client = client.clone();
            let cache = cache.clone();
            let state = poll_state.clone();
            async move {
                let outcome = cache
                    .refresh(Self::CACHE_KEY, || async { client.aggregate_quote().await })
                    .await;
                let mut state = state.lock();
                match outcome {
                    FetchOutcome::Fresh(quote) => {
                        state.quote = Some(quote);
                        state.notice = None;
                    }
                    FetchOutcome::Stale { value, error } => {
                        warn!(error = %error, "aggregate poll failed, keeping stale quote");
                        state.quote = Some(value);
                        state.notice = Some(error.to_string());
                    }
                    FetchOutcome::Failed(error) => {
                        warn!(error = %error, "aggregate poll failed with nothing cached");
                        state.notice = Some(error.to_string());
                    }
                }
            }
        });

        Self { state, poller }
    }

    pub fn latest(&self) -> Option<Quote> {
        self.state.lock().quote.clone()
    }

    /// Transient failure message for the UI, if the last poll failed.
    pub fn notice(&self) -> Option<String> {
        self.state.lock().notice.clone()
    }

    pub fn refresh_now(&self) {
        self.poller.refresh_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::{router, AppState};
    use crate::config::DEMO_API_KEY;
    use crate::source::AlphaVantageSource;
    use crate::store::memory::MemoryStore;

    async fn serve_demo() -> String {
        let store = Arc::new(MemoryStore::new());
        crate::store::seed::seed(store.as_ref()).await.unwrap();
        let state = AppState::new(store, Arc::new(AlphaVantageSource::new(DEMO_API_KEY)));
        let app = router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn typed_getters_round_trip_against_the_api() {
        let base = serve_demo().await;
        let client = DashboardClient::new(base);

        let stocks = client.stocks().await.unwrap();
        assert_eq!(stocks.len(), 10);

        let aapl = client.stock("AAPL").await.unwrap();
        assert_eq!(aapl.symbol, "AAPL");

        let history = client.history("AAPL", Some(5)).await.unwrap();
        assert_eq!(history.len(), 5);

        let news = client.news(Some(2)).await.unwrap();
        assert_eq!(news.len(), 2);

        let components = client.components().await.unwrap();
        assert_eq!(components.len(), 30);

        let aggregate = client.aggregate_quote().await.unwrap();
        assert_eq!(aggregate.symbol, "DJI");
        assert_eq!(aggregate.price, 34256.89);
    }

    #[tokio::test]
    async fn unknown_symbol_is_an_error() {
        let base = serve_demo().await;
        let client = DashboardClient::new(base);
        let err = client.stock("ZZZZ").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn quote_feed_caches_latest_and_clears_notice() {
        let base = serve_demo().await;
        let client = Arc::new(DashboardClient::new(base));

        let feed = QuoteFeed::start(client, Duration::from_secs(30));
        // First tick fires on spawn; wait for it to land.
        for _ in 0..50 {
            if feed.latest().is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let quote = feed.latest().expect("feed should have a quote");
        assert_eq!(quote.symbol, "DJI");
        assert_eq!(feed.notice(), None);
    }

    #[tokio::test]
    async fn quote_feed_surfaces_notice_when_backend_is_unreachable() {
        // Nothing listens on this port.
        let client = Arc::new(DashboardClient::new("http://127.0.0.1:9"));

        let feed = QuoteFeed::start(client, Duration::from_secs(30));
        for _ in 0..50 {
            if feed.notice().is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert!(feed.notice().is_some());
        assert_eq!(feed.latest(), None);
    }
}
