//! Alpha Vantage global quote, relayed by the local proxy

use super::http::{endpoint, get_json};
use super::{ProviderError, QuoteProvider, RawQuote};
use crate::catalog;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Alpha Vantage quote provider (`/api/alphavantage/{ticker}`)
pub struct AlphaVantageProvider {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl AlphaVantageProvider {
    pub fn new(client: Client, proxy_base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: format!("{}/api/alphavantage", proxy_base_url.trim_end_matches('/')),
            timeout,
            client,
        }
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "alphavantage-proxy"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, id: &str) -> Result<RawQuote, ProviderError> {
        let symbol = catalog::alphavantage_symbol(id);
        let url = endpoint(&self.base_url, &[&symbol])?;
        let response: GlobalQuoteResponse = get_json(&self.client, url, &[]).await?;
        parse_global_quote(response)
    }
}

/// Rate-limit notices come back as `{"Note": ...}` without a quote
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

/// Alpha Vantage encodes every number as a string
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "06. volume")]
    volume: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

fn parse_number(field: &str, value: Option<&str>) -> Result<f64, ProviderError> {
    let value = value.ok_or_else(|| ProviderError::Malformed(format!("missing {field}")))?;
    value
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|e| ProviderError::Malformed(format!("{field} {value:?}: {e}")))
}

fn parse_global_quote(response: GlobalQuoteResponse) -> Result<RawQuote, ProviderError> {
    let quote = match response.global_quote {
        Some(quote) => quote,
        None => {
            let reason = response.note.unwrap_or_else(|| "missing Global Quote".to_string());
            return Err(ProviderError::Malformed(reason));
        }
    };

    Ok(RawQuote {
        price: parse_number("05. price", quote.price.as_deref())?,
        change: parse_number("09. change", quote.change.as_deref())?,
        change_percent: parse_number("10. change percent", quote.change_percent.as_deref())?,
        volume: quote.volume.as_deref().and_then(|v| v.trim().parse().ok()),
        ..RawQuote::default()
    })
}
