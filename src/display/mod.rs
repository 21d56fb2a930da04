pub mod chart;

use chrono::{DateTime, Utc};

use crate::store::Quote;

/// Fallback figures shown while the live price card has no data yet.
pub const FALLBACK_PRICE: f64 = 34256.89;
pub const FALLBACK_CHANGE: f64 = 127.34;
pub const FALLBACK_CHANGE_PERCENT: f64 = 0.37;
pub const FALLBACK_DAY_HIGH: f64 = 34401.23;
pub const FALLBACK_DAY_LOW: f64 = 34012.45;
pub const FALLBACK_YEAR_HIGH: f64 = 36799.65;
pub const FALLBACK_YEAR_LOW: f64 = 28660.94;

/// `$34,256.89` — dollar sign, thousands separators, two decimals.
pub fn format_price(value: f64) -> String {
    let negative = value < 0.0;
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-${grouped}.{frac}")
    } else {
        format!("${grouped}.{frac}")
    }
}

/// `+127.34` / `-45.20` — explicit sign on gains.
pub fn format_change(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

/// `+0.37%` / `-1.23%`.
pub fn format_change_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

/// Abbreviated share volume: `2.4M`, `1.2B`, `850.0K`.
pub fn format_volume(volume: u64) -> String {
    let v = volume as f64;
    if v >= 1_000_000_000.0 {
        format!("{:.1}B", v / 1_000_000_000.0)
    } else if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        volume.to_string()
    }
}

/// Relative age of a news item, matching the widget's buckets: minutes under
/// an hour, hours under a day, days after that. Future timestamps clamp to
/// "0 minutes ago".
pub fn time_ago(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - published_at).num_minutes().max(0);
    if minutes < 60 {
        format!("{minutes} minutes ago")
    } else if minutes < 1440 {
        let hours = minutes / 60;
        format!("{hours} hour{} ago", if hours > 1 { "s" } else { "" })
    } else {
        let days = minutes / 1440;
        format!("{days} day{} ago", if days > 1 { "s" } else { "" })
    }
}

/// Pre-formatted live price card. Pure projection of a quote (or of the
/// fallback constants while loading).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceCard {
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub day_high: String,
    pub day_low: String,
    pub year_high: String,
    pub year_low: String,
    pub positive: bool,
}

pub fn price_card(quote: Option<&Quote>) -> PriceCard {
    let price = quote.map(|q| q.price).unwrap_or(FALLBACK_PRICE);
    let change = quote.map(|q| q.change).unwrap_or(FALLBACK_CHANGE);
    let change_percent = quote
        .map(|q| q.change_percent)
        .unwrap_or(FALLBACK_CHANGE_PERCENT);
    let day_high = quote
        .and_then(|q| q.day_high)
        .unwrap_or(FALLBACK_DAY_HIGH);
    let day_low = quote.and_then(|q| q.day_low).unwrap_or(FALLBACK_DAY_LOW);
    let year_high = quote
        .and_then(|q| q.year_high)
        .unwrap_or(FALLBACK_YEAR_HIGH);
    let year_low = quote.and_then(|q| q.year_low).unwrap_or(FALLBACK_YEAR_LOW);

    PriceCard {
        price: format_price(price),
        change: format_change(change),
        change_percent: format_change_percent(change_percent),
        day_high: format_price(day_high),
        day_low: format_price(day_low),
        year_high: format_price(year_high),
        year_low: format_price(year_low),
        positive: change >= 0.0,
    }
}
