//! Yahoo Finance chart endpoint, direct or through the local proxy
//!
//! Both variants return the v8 chart payload; only the base URL differs.

use super::http::{endpoint, get_json};
use super::{ProviderError, QuoteProvider, RawQuote};
use crate::catalog;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Public Yahoo Finance chart API
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo chart quote provider
pub struct YahooProvider {
    name: String,
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl YahooProvider {
    /// Create a provider against an arbitrary chart base URL
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        client: Client,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            timeout,
            client,
        }
    }

    /// Public chart endpoint, no proxy
    pub fn direct(client: Client, base_url: &str, timeout: Duration) -> Self {
        Self::new("yahoo", base_url.trim_end_matches('/'), timeout, client)
    }

    /// Chart payload relayed by the proxy under `/api/yahoo/{symbol}`
    pub fn proxy(client: Client, proxy_base_url: &str, timeout: Duration) -> Self {
        let base = format!("{}/api/yahoo", proxy_base_url.trim_end_matches('/'));
        Self::new("yahoo-proxy", base, timeout, client)
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, id: &str) -> Result<RawQuote, ProviderError> {
        let symbol = catalog::yahoo_symbol(id);
        let url = endpoint(&self.base_url, &[&symbol])?;
        let response: ChartResponse = get_json(&self.client, url, &[]).await?;
        parse_chart(response)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChartMeta {
    currency: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_volume: Option<f64>,
}

/// Normalize a chart payload
///
/// Change is computed against the previous close; a missing previous close
/// yields a zero change rather than a failure.
fn parse_chart(response: ChartResponse) -> Result<RawQuote, ProviderError> {
    if let Some(error) = response.chart.error {
        return Err(ProviderError::Malformed(format!(
            "chart error {}: {}",
            error.code.unwrap_or_default(),
            error.description.unwrap_or_default()
        )));
    }

    let meta = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .map(|result| result.meta)
        .ok_or_else(|| ProviderError::Malformed("empty chart result".to_string()))?;

    let price = meta
        .regular_market_price
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| ProviderError::Malformed("missing regularMarketPrice".to_string()))?;

    let previous_close = meta
        .previous_close
        .or(meta.chart_previous_close)
        .filter(|p| *p > 0.0);

    let (change, change_percent) = match previous_close {
        Some(prev) => {
            let change = price - prev;
            (change, change / prev * 100.0)
        }
        None => (0.0, 0.0),
    };

    Ok(RawQuote {
        price,
        change,
        change_percent,
        volume: meta.regular_market_volume,
        market_cap: None,
        currency: meta.currency,
        description: meta.long_name.or(meta.short_name),
    })
}
