//! TradingView scanner quote endpoint

use super::http::{endpoint, get_json};
use super::{ProviderError, QuoteProvider, RawQuote};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// TradingView scanner base URL
pub const TRADINGVIEW_SCANNER_URL: &str = "https://scanner.tradingview.com";

/// Fields requested from the scanner
const SCANNER_FIELDS: &str =
    "close_price,change,change_percent,volume,market_cap_basic,currency_code,description,type,exchange";

/// TradingView quote provider; takes exchange-qualified identifiers as-is
pub struct TradingViewProvider {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl TradingViewProvider {
    pub fn new(client: Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client,
        }
    }
}

#[async_trait]
impl QuoteProvider for TradingViewProvider {
    fn name(&self) -> &str {
        "tradingview"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, id: &str) -> Result<RawQuote, ProviderError> {
        let url = endpoint(&self.base_url, &["symbol"])?;
        let query = [("symbol", id), ("fields", SCANNER_FIELDS)];
        let response: ScannerResponse = get_json(&self.client, url, &query).await?;
        parse_scanner(response)
    }
}

#[derive(Debug, Deserialize)]
struct ScannerResponse {
    #[serde(default)]
    data: Vec<ScannerRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScannerRow {
    close_price: Option<f64>,
    change: Option<f64>,
    change_percent: Option<f64>,
    volume: Option<f64>,
    market_cap_basic: Option<f64>,
    currency_code: Option<String>,
    description: Option<String>,
}

fn parse_scanner(response: ScannerResponse) -> Result<RawQuote, ProviderError> {
    let row = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("empty scanner data".to_string()))?;

    let price = row
        .close_price
        .filter(|p| *p > 0.0)
        .ok_or_else(|| ProviderError::Malformed("missing close_price".to_string()))?;

    Ok(RawQuote {
        price,
        change: row.change.unwrap_or(0.0),
        change_percent: row.change_percent.unwrap_or(0.0),
        volume: row.volume,
        market_cap: row.market_cap_basic,
        currency: row.currency_code,
        description: row.description,
    })
}
