//! Quote providers
//!
//! Each provider fetches one third-party quote endpoint and normalizes the
//! payload into a [`RawQuote`]. The [`ProviderChain`] tries them in order and
//! returns the first success.

mod alphavantage;
mod chain;
mod finnhub;
mod http;
mod tradingview;
mod yahoo;

pub use alphavantage::AlphaVantageProvider;
pub use chain::{ChainExhausted, FailedAttempt, ProviderChain, ProviderHit};
pub use finnhub::FinnhubProvider;
pub use tradingview::{TradingViewProvider, TRADINGVIEW_SCANNER_URL};
pub use yahoo::{YahooProvider, YAHOO_CHART_URL};

use crate::catalog::{self, SymbolMeta};
use crate::quote::Quote;
use crate::simulator;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

/// Provider failures; all of them advance the chain to the next provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure (connect, TLS, body read)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// No response within the provider's deadline
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// Non-success HTTP status
    #[error("HTTP status {0}")]
    Status(u16),
    /// Response body lacks the expected fields
    #[error("malformed payload: {0}")]
    Malformed(String),
    /// Endpoint URL could not be built
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Provider payload normalized to common field names
///
/// Fields a provider does not supply stay `None` and are filled in by
/// [`RawQuote::complete`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuote {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: Option<f64>,
    pub market_cap: Option<f64>,
    pub currency: Option<String>,
    pub description: Option<String>,
}

impl RawQuote {
    /// Fill missing fields: volume 0, synthetic market cap from the real
    /// price, currency and description from the catalog
    pub fn complete<R: Rng>(self, id: &str, rng: &mut R) -> Quote {
        let info = catalog::lookup(id);
        let SymbolMeta { name, currency, .. } = catalog::meta(id);
        let market_cap = match self.market_cap {
            Some(cap) if cap > 0.0 => cap,
            _ => simulator::generate_market_cap(&info, self.price, rng),
        };

        Quote {
            price: self.price,
            change: self.change,
            change_percent: self.change_percent,
            volume: self.volume.unwrap_or(0.0),
            market_cap,
            currency: self.currency.filter(|c| !c.is_empty()).unwrap_or(currency),
            description: self.description.filter(|d| !d.is_empty()).unwrap_or(name),
        }
    }
}

/// A remote quote source
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Stable name used in logs and metrics
    fn name(&self) -> &str;

    /// Deadline for one fetch attempt
    fn timeout(&self) -> Duration;

    /// Fetch and normalize a quote for an exchange-qualified identifier
    async fn fetch(&self, id: &str) -> Result<RawQuote, ProviderError>;
}
