//! Ordered first-success-wins provider chain

use super::{
    AlphaVantageProvider, FinnhubProvider, ProviderError, QuoteProvider, TradingViewProvider,
    YahooProvider,
};
use crate::cache::QuoteCache;
use crate::config::{ProviderKind, ProvidersConfig};
use crate::quote::Quote;
use crate::telemetry;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use thiserror::Error;

/// A provider that failed during one chain run
#[derive(Debug)]
pub struct FailedAttempt {
    pub provider: String,
    pub error: ProviderError,
}

/// Successful chain run
#[derive(Debug)]
pub struct ProviderHit {
    /// Name of the provider that answered
    pub provider: String,
    pub quote: Quote,
    /// Providers tried and skipped before the winner
    pub failures: Vec<FailedAttempt>,
    pub latency: Duration,
}

/// Every provider failed; the caller falls back to the simulator
#[derive(Debug, Error)]
#[error("all {} quote providers failed", .attempts.len())]
pub struct ChainExhausted {
    pub attempts: Vec<FailedAttempt>,
}

/// Ordered list of quote providers tried one at a time
///
/// Providers are awaited sequentially, never raced. Each attempt has its own
/// deadline, and a timeout only abandons that attempt.
pub struct ProviderChain {
    providers: Vec<Arc<dyn QuoteProvider>>,
    cache: QuoteCache,
    /// Used to synthesize market caps providers do not report
    rng: Mutex<StdRng>,
}

impl ProviderChain {
    /// Create a chain over `providers`, writing successes into `cache`
    pub fn new(providers: Vec<Arc<dyn QuoteProvider>>, cache: QuoteCache) -> Self {
        Self {
            providers,
            cache,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seed the market-cap synthesis for reproducible output
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Build the configured providers in configured order
    pub fn from_config(config: &ProvidersConfig, cache: QuoteCache) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("market-sentiment/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let providers = config
            .order
            .iter()
            .map(|kind| build_provider(*kind, config, client.clone()))
            .collect();

        Ok(Self::new(providers, cache))
    }

    /// Provider names in attempt order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Shared cache successes are written to
    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    /// Try each provider in order until one returns a quote
    ///
    /// The winning quote is completed (missing fields filled), written to the
    /// cache, then returned. Providers after the winner are never invoked.
    pub async fn fetch_quote(&self, id: &str) -> Result<ProviderHit, ChainExhausted> {
        let started = Instant::now();
        let mut failures = Vec::new();

        for provider in &self.providers {
            let name = provider.name();
            let deadline = provider.timeout();
            let attempt_started = Instant::now();

            let result = match tokio::time::timeout(deadline, provider.fetch(id)).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(deadline)),
            };
            telemetry::record_provider_latency(name, attempt_started.elapsed());

            match result {
                Ok(raw) => {
                    let quote = {
                        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                        raw.complete(id, &mut *rng)
                    };
                    self.cache.put(id, quote.clone()).await;

                    tracing::info!(
                        provider = name,
                        symbol = id,
                        price = quote.price,
                        skipped = failures.len(),
                        "Quote received"
                    );

                    return Ok(ProviderHit {
                        provider: name.to_string(),
                        quote,
                        failures,
                        latency: started.elapsed(),
                    });
                }
                Err(error) => {
                    tracing::warn!(provider = name, symbol = id, error = %error, "Quote provider failed");
                    telemetry::record_provider_failure(name);
                    failures.push(FailedAttempt {
                        provider: name.to_string(),
                        error,
                    });
                }
            }
        }

        Err(ChainExhausted { attempts: failures })
    }
}

fn build_provider(
    kind: ProviderKind,
    config: &ProvidersConfig,
    client: Client,
) -> Arc<dyn QuoteProvider> {
    let proxy = config.proxy_base_url.as_str();
    match kind {
        ProviderKind::YahooProxy => Arc::new(YahooProvider::proxy(
            client,
            proxy,
            config.proxy_timeout(),
        )),
        ProviderKind::AlphaVantageProxy => Arc::new(AlphaVantageProvider::new(
            client,
            proxy,
            config.proxy_timeout(),
        )),
        ProviderKind::FinnhubProxy => Arc::new(FinnhubProvider::new(
            client,
            proxy,
            config.proxy_timeout(),
        )),
        ProviderKind::TradingView => Arc::new(TradingViewProvider::new(
            client,
            &config.tradingview_url,
            config.tradingview_timeout(),
        )),
        ProviderKind::Yahoo => Arc::new(YahooProvider::direct(
            client,
            &config.yahoo_url,
            config.yahoo_timeout(),
        )),
    }
}
