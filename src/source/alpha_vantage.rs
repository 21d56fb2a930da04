use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::{QuoteSource, UpstreamError};
use crate::config::DEMO_API_KEY;
use crate::store::QuoteInput;

const AGGREGATE_SYMBOL: &str = "DJI";
const AGGREGATE_NAME: &str = "Dow Jones Industrial Average";

/// The GLOBAL_QUOTE endpoint does not supply a market cap; the dashboard
/// shows this placeholder instead.
const MARKET_CAP_PLACEHOLDER: &str = "$8.2T";

/// Alpha Vantage GLOBAL_QUOTE adapter for the DJIA aggregate. With the
/// `demo` credential it never touches the network and returns a fixed record.
pub struct AlphaVantageSource {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageSource {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: "https://www.alphavantage.co/query".into(),
        }
    }

    fn demo_mode(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }
}

/// Fixed record served in demo mode.
pub fn demo_quote() -> QuoteInput {
    QuoteInput {
        symbol: AGGREGATE_SYMBOL.to_string(),
        name: AGGREGATE_NAME.to_string(),
        price: 34256.89,
        change: 127.34,
        change_percent: 0.37,
        volume: 2_400_000,
        market_cap: Some(MARKET_CAP_PLACEHOLDER.to_string()),
        day_high: Some(34401.23),
        day_low: Some(34012.45),
        year_high: Some(36799.65),
        year_low: Some(28660.94),
    }
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteEnvelope {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "03. high")]
    high: String,
    #[serde(rename = "04. low")]
    low: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64, UpstreamError> {
    value.parse().map_err(|_| UpstreamError::MalformedField {
        field,
        value: value.to_string(),
    })
}

fn parse_u64(field: &'static str, value: &str) -> Result<u64, UpstreamError> {
    value.parse().map_err(|_| UpstreamError::MalformedField {
        field,
        value: value.to_string(),
    })
}

fn map_global_quote(quote: GlobalQuote) -> Result<QuoteInput, UpstreamError> {
    let day_high = parse_f64("03. high", &quote.high)?;
    let day_low = parse_f64("04. low", &quote.low)?;
    Ok(QuoteInput {
        symbol: quote.symbol,
        name: AGGREGATE_NAME.to_string(),
        price: parse_f64("05. price", &quote.price)?,
        change: parse_f64("09. change", &quote.change)?,
        change_percent: parse_f64(
            "10. change percent",
            quote.change_percent.trim_end_matches('%'),
        )?,
        volume: parse_u64("06. volume", &quote.volume)?,
        market_cap: Some(MARKET_CAP_PLACEHOLDER.to_string()),
        day_high: Some(day_high),
        day_low: Some(day_low),
        // GLOBAL_QUOTE carries no 52-week figures; the day range stands in.
        // Known upstream gap, kept as documented behavior.
        year_high: Some(day_high),
        year_low: Some(day_low),
    })
}

#[async_trait]
impl QuoteSource for AlphaVantageSource {
    async fn fetch_aggregate(&self) -> Result<QuoteInput, UpstreamError> {
        if self.demo_mode() {
            info!("no provider credential configured, serving demo quote");
            return Ok(demo_quote());
        }

        let url = format!(
            "{}?function=GLOBAL_QUOTE&symbol={}&apikey={}",
            self.base_url, AGGREGATE_SYMBOL, self.api_key
        );
        debug!(symbol = AGGREGATE_SYMBOL, "fetching aggregate quote");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let envelope: GlobalQuoteEnvelope = response.json().await?;
        if let Some(message) = envelope.error_message {
            return Err(UpstreamError::Provider(message));
        }
        let quote = envelope.global_quote.ok_or(UpstreamError::MissingQuote)?;
        map_global_quote(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quote() -> GlobalQuote {
        GlobalQuote {
            symbol: "DJI".to_string(),
            high: "34401.2300".to_string(),
            low: "34012.4500".to_string(),
            price: "34256.8900".to_string(),
            volume: "2400000".to_string(),
            change: "127.3400".to_string(),
            change_percent: "0.3700%".to_string(),
        }
    }

    #[tokio::test]
    async fn demo_mode_returns_fixed_record() {
        let source = AlphaVantageSource::new(DEMO_API_KEY);
        let quote = source.fetch_aggregate().await.unwrap();

        assert_eq!(quote.symbol, "DJI");
        assert_eq!(quote.name, "Dow Jones Industrial Average");
        assert_eq!(quote.price, 34256.89);
        assert_eq!(quote.change, 127.34);
        assert_eq!(quote.change_percent, 0.37);
        assert_eq!(quote.volume, 2_400_000);
        assert_eq!(quote.day_high, Some(34401.23));
        assert_eq!(quote.day_low, Some(34012.45));
        assert_eq!(quote.year_high, Some(36799.65));
        assert_eq!(quote.year_low, Some(28660.94));
        assert_eq!(quote.market_cap.as_deref(), Some("$8.2T"));
    }

    #[test]
    fn maps_provider_fields_and_strips_percent_sign() {
        let mapped = map_global_quote(sample_quote()).unwrap();
        assert_eq!(mapped.symbol, "DJI");
        assert_eq!(mapped.price, 34256.89);
        assert_eq!(mapped.change_percent, 0.37);
        assert_eq!(mapped.volume, 2_400_000);
        // 52-week range is approximated by the day range.
        assert_eq!(mapped.year_high, mapped.day_high);
        assert_eq!(mapped.year_low, mapped.day_low);
    }

    #[test]
    fn malformed_number_is_rejected() {
        let mut quote = sample_quote();
        quote.price = "n/a".to_string();
        let err = map_global_quote(quote).unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::MalformedField { field: "05. price", .. }
        ));
    }

    #[test]
    fn error_payload_and_missing_quote_are_detected() {
        let with_error: GlobalQuoteEnvelope = serde_json::from_str(
            r#"{"Error Message": "Invalid API call."}"#,
        )
        .unwrap();
        assert_eq!(with_error.error_message.as_deref(), Some("Invalid API call."));
        assert!(with_error.global_quote.is_none());

        let empty: GlobalQuoteEnvelope = serde_json::from_str("{}").unwrap();
        assert!(empty.global_quote.is_none());
        assert!(empty.error_message.is_none());
    }

    #[test]
    fn parses_global_quote_wire_format() {
        let payload = r#"{
            "Global Quote": {
                "01. symbol": "DJI",
                "02. open": "34100.0000",
                "03. high": "34401.2300",
                "04. low": "34012.4500",
                "05. price": "34256.8900",
                "06. volume": "2400000",
                "07. latest trading day": "2024-06-21",
                "08. previous close": "34129.5500",
                "09. change": "127.3400",
                "10. change percent": "0.3700%"
            }
        }"#;
        let envelope: GlobalQuoteEnvelope = serde_json::from_str(payload).unwrap();
        let mapped = map_global_quote(envelope.global_quote.unwrap()).unwrap();
        assert_eq!(mapped.change, 127.34);
        assert_eq!(mapped.change_percent, 0.37);
    }
}
