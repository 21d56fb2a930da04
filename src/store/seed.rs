use chrono::{Duration, Utc};
use rand::Rng;
use tracing::info;

use super::types::{HistoryPointInput, NewsItemInput, QuoteInput, StoreResult};
use super::MarketStore;

/// Base prices the synthetic quotes are randomized around.
const SEED_STOCKS: [(&str, &str, f64); 10] = [
    ("AAPL", "Apple Inc.", 175.84),
    ("MSFT", "Microsoft Corp.", 378.91),
    ("UNH", "UnitedHealth Group Inc.", 523.67),
    ("GS", "Goldman Sachs Group Inc.", 445.23),
    ("HD", "Home Depot Inc.", 312.45),
    ("CAT", "Caterpillar Inc.", 267.89),
    ("AMGN", "Amgen Inc.", 298.76),
    ("MCD", "McDonald's Corp.", 289.34),
    ("V", "Visa Inc.", 256.78),
    ("BA", "Boeing Co.", 203.45),
];

const MARKET_CAP_LABELS: [&str; 8] = [
    "$1.2T", "$2.8T", "$487B", "$123B", "$89B", "$456B", "$234B", "$678B",
];

const HISTORY_POINTS_PER_SYMBOL: usize = 30;

/// Populates the store with synthetic quotes, per-symbol price history and a
/// few news items so the dashboard has something to render before any live
/// data arrives.
pub async fn seed(store: &dyn MarketStore) -> StoreResult<()> {
    let now = Utc::now();

    // ThreadRng is not Send, so all randomized inputs are generated up front
    // and the await points below only see plain data.
    let (quotes, history) = {
        let mut rng = rand::thread_rng();
        let mut quotes = Vec::with_capacity(SEED_STOCKS.len());
        let mut history = Vec::with_capacity(SEED_STOCKS.len() * HISTORY_POINTS_PER_SYMBOL);

        for (symbol, name, base_price) in SEED_STOCKS {
            let change_percent = rng.gen_range(-2.0..2.0);
            let change = base_price * (change_percent / 100.0);
            let price = base_price + change;

            quotes.push(QuoteInput {
                symbol: symbol.to_string(),
                name: name.to_string(),
                price,
                change,
                change_percent,
                volume: rng.gen_range(1_000_000..6_000_000),
                market_cap: Some(
                    MARKET_CAP_LABELS[rng.gen_range(0..MARKET_CAP_LABELS.len())].to_string(),
                ),
                day_high: Some(price + rng.gen_range(0.0..10.0)),
                day_low: Some(price - rng.gen_range(0.0..10.0)),
                year_high: Some(price + rng.gen_range(20.0..70.0)),
                year_low: Some(price - rng.gen_range(20.0..70.0)),
            });

            // One observation every 30 minutes going back from now.
            for i in 0..HISTORY_POINTS_PER_SYMBOL {
                history.push(HistoryPointInput {
                    symbol: symbol.to_string(),
                    timestamp: now - Duration::minutes(i as i64 * 30),
                    price: base_price + rng.gen_range(-10.0..10.0),
                    volume: Some(rng.gen_range(100_000..1_100_000)),
                });
            }
        }
        (quotes, history)
    };

    for input in quotes {
        store.upsert_quote(input).await?;
    }
    for input in history {
        store.append_history(input).await?;
    }

    let news = [
        (
            "Fed Signals Potential Rate Cuts in Q4 2024",
            "Federal Reserve officials hint at possible interest rate reductions as inflation shows signs of cooling.",
            "MarketWatch",
            2,
            "https://example.com/fed-rate-cuts",
        ),
        (
            "Tech Stocks Rally on AI Optimism",
            "Major technology companies see significant gains as artificial intelligence developments drive investor confidence.",
            "Financial Times",
            4,
            "https://example.com/tech-rally",
        ),
        (
            "Energy Sector Gains on Oil Price Surge",
            "Oil prices climb to multi-month highs, boosting energy company valuations across the board.",
            "Bloomberg",
            6,
            "https://example.com/energy-gains",
        ),
    ];
    for (headline, summary, source, hours_ago, url) in news {
        store
            .append_news(NewsItemInput {
                headline: headline.to_string(),
                summary: Some(summary.to_string()),
                source: Some(source.to_string()),
                published_at: now - Duration::hours(hours_ago),
                url: Some(url.to_string()),
            })
            .await?;
    }

    info!(
        stocks = SEED_STOCKS.len(),
        history_per_stock = HISTORY_POINTS_PER_SYMBOL,
        news = news.len(),
        "seeded in-memory store"
    );
    Ok(())
}
