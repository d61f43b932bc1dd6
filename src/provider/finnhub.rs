//! Finnhub quote, relayed by the local proxy

use super::http::{endpoint, get_json};
use super::{ProviderError, QuoteProvider, RawQuote};
use crate::catalog;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Finnhub quote provider (`/api/finnhub/{symbol}`)
pub struct FinnhubProvider {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl FinnhubProvider {
    pub fn new(client: Client, proxy_base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: format!("{}/api/finnhub", proxy_base_url.trim_end_matches('/')),
            timeout,
            client,
        }
    }
}

#[async_trait]
impl QuoteProvider for FinnhubProvider {
    fn name(&self) -> &str {
        "finnhub-proxy"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, id: &str) -> Result<RawQuote, ProviderError> {
        let symbol = catalog::finnhub_symbol(id);
        let url = endpoint(&self.base_url, &[&symbol])?;
        let response: FinnhubQuote = get_json(&self.client, url, &[]).await?;
        parse_quote(response)
    }
}

/// Finnhub quote: current price, change, percent change
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FinnhubQuote {
    c: Option<f64>,
    d: Option<f64>,
    dp: Option<f64>,
}

/// Finnhub answers unknown symbols with all-zero fields, so a zero price
/// counts as missing
fn parse_quote(quote: FinnhubQuote) -> Result<RawQuote, ProviderError> {
    let price = quote
        .c
        .filter(|c| *c != 0.0)
        .ok_or_else(|| ProviderError::Malformed("missing current price".to_string()))?;

    Ok(RawQuote {
        price,
        change: quote.d.unwrap_or(0.0),
        change_percent: quote.dp.unwrap_or(0.0),
        ..RawQuote::default()
    })
}
