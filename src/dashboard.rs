//! Dashboard state
//!
//! One [`Dashboard`] owns the quote cache, the provider chain, the current
//! symbol selection and the optional auto-refresh task. Every load publishes
//! a [`Snapshot`] whose quote, indicators and sentiment were derived together;
//! results for a symbol that is no longer selected are discarded.

use crate::cache::QuoteCache;
use crate::catalog::{self, news};
use crate::config::{Config, DashboardConfig};
use crate::provider::ProviderChain;
use crate::quote::Quote;
use crate::sentiment::{self, Indicators, ScoringWeights, SentimentResult};
use crate::simulator::{self, MarketHours};
use crate::telemetry;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Status indicator shown next to the quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStatus {
    /// Simulated placeholder while providers are being queried
    Connecting,
    /// Quote came from a provider (directly or via the cache)
    Live,
    /// Every provider failed; the quote is simulated
    Simulated,
}

impl fmt::Display for DataStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connecting => "Connecting",
            Self::Live => "Live",
            Self::Simulated => "Simulated",
        })
    }
}

/// Where the published quote came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Cache,
    Provider(String),
    Simulator,
}

impl QuoteSource {
    /// Metric/log label
    pub fn label(&self) -> &str {
        match self {
            Self::Cache => "cache",
            Self::Provider(name) => name,
            Self::Simulator => "simulator",
        }
    }
}

impl fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the view renders for one symbol at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub symbol: String,
    pub quote: Quote,
    pub indicators: Indicators,
    pub fear_greed: u8,
    pub sentiment: SentimentResult,
    pub status: DataStatus,
    pub source: QuoteSource,
    /// Market news line for the symbol's asset class
    pub headline: String,
    pub updated_at: DateTime<Utc>,
}

struct Inner {
    chain: ProviderChain,
    cache: QuoteCache,
    weights: ScoringWeights,
    refresh_interval: Duration,
    rng: Mutex<StdRng>,
    current: RwLock<String>,
    snapshots: watch::Sender<Option<Snapshot>>,
    refresh: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let slot = self.refresh.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

/// Dashboard handle; clones share state
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

impl Dashboard {
    /// Create a dashboard over `chain`, sharing the chain's cache
    pub fn new(chain: ProviderChain, config: &DashboardConfig, weights: ScoringWeights) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (snapshots, _) = watch::channel(None);
        tracing::debug!(
            cache_ttl_secs = chain.cache().ttl().as_secs(),
            refresh_interval_secs = config.refresh_interval().as_secs(),
            "Dashboard created"
        );

        Self {
            inner: Arc::new(Inner {
                cache: chain.cache().clone(),
                chain,
                weights,
                refresh_interval: config.refresh_interval(),
                rng: Mutex::new(rng),
                current: RwLock::new(config.default_symbol.clone()),
                snapshots,
                refresh: Mutex::new(None),
            }),
        }
    }

    /// Build the cache, provider chain and dashboard from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = QuoteCache::new(config.dashboard.cache_ttl());
        let mut chain = ProviderChain::from_config(&config.providers, cache)?;
        if let Some(seed) = config.dashboard.seed {
            chain = chain.with_seed(seed.wrapping_add(1));
        }

        Ok(Self::new(chain, &config.dashboard, config.scoring.clone()))
    }

    /// Selected symbol
    pub fn current_symbol(&self) -> String {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.inner.snapshots.borrow().clone()
    }

    pub fn quote(&self) -> Option<Quote> {
        self.inner.snapshots.borrow().as_ref().map(|s| s.quote.clone())
    }

    pub fn indicators(&self) -> Option<Indicators> {
        self.inner.snapshots.borrow().as_ref().map(|s| s.indicators)
    }

    pub fn sentiment(&self) -> Option<SentimentResult> {
        self.inner
            .snapshots
            .borrow()
            .as_ref()
            .map(|s| s.sentiment.clone())
    }

    /// Status of the latest snapshot; `Connecting` before the first load
    pub fn status(&self) -> DataStatus {
        self.inner
            .snapshots
            .borrow()
            .as_ref()
            .map_or(DataStatus::Connecting, |s| s.status)
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.inner.snapshots.subscribe()
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.inner
            .refresh
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Load data for `symbol`, publishing while it is the selected symbol
    ///
    /// A cache hit publishes a live snapshot straight away. Otherwise a
    /// simulated snapshot is published with status `Connecting`, then the
    /// provider chain runs: success publishes a live snapshot, exhaustion
    /// republishes the simulated quote with status `Simulated`. Returns the
    /// final snapshot of this load, even if it was discarded as stale.
    pub async fn load_data(&self, symbol: &str) -> Snapshot {
        let hours = MarketHours::now();

        if let Some(quote) = self.inner.cache.get(symbol).await {
            telemetry::record_cache_hit();
            tracing::debug!(symbol, "Serving cached quote");
            let snapshot = self.derive(symbol, quote, hours, DataStatus::Live, QuoteSource::Cache);
            self.publish(&snapshot);
            return snapshot;
        }

        let simulated = {
            let mut rng = self.inner.rng.lock().unwrap_or_else(PoisonError::into_inner);
            simulator::simulate(symbol, hours, &mut *rng)
        };
        let placeholder = self.derive(
            symbol,
            simulated.clone(),
            hours,
            DataStatus::Connecting,
            QuoteSource::Simulator,
        );
        self.publish(&placeholder);

        let snapshot = match self.inner.chain.fetch_quote(symbol).await {
            Ok(hit) => {
                tracing::debug!(
                    symbol,
                    provider = %hit.provider,
                    latency_ms = hit.latency.as_millis() as u64,
                    skipped = hit.failures.len(),
                    "Live quote loaded"
                );
                self.derive(
                    symbol,
                    hit.quote,
                    hours,
                    DataStatus::Live,
                    QuoteSource::Provider(hit.provider),
                )
            }
            Err(exhausted) => {
                tracing::warn!(
                    symbol,
                    attempts = exhausted.attempts.len(),
                    "No live quote, using simulated data"
                );
                self.derive(
                    symbol,
                    simulated,
                    hours,
                    DataStatus::Simulated,
                    QuoteSource::Simulator,
                )
            }
        };

        self.publish(&snapshot);
        snapshot
    }

    /// Select `symbol`, restart auto-refresh if it is on, then load
    pub async fn change_symbol(&self, symbol: &str) -> Snapshot {
        self.select(symbol);
        {
            let mut slot = self.inner.refresh.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(handle) = slot.take() {
                handle.abort();
                *slot = Some(self.spawn_refresh());
            }
        }
        tracing::info!(symbol, "Symbol changed");
        self.load_data(symbol).await
    }

    /// Turn periodic reloading of the selected symbol on or off
    ///
    /// Returns whether auto-refresh is now enabled. Must be called within a
    /// tokio runtime.
    pub fn toggle_auto_refresh(&self) -> bool {
        let mut slot = self.inner.refresh.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.take() {
            Some(handle) => {
                handle.abort();
                tracing::info!("Auto-refresh disabled");
                false
            }
            None => {
                *slot = Some(self.spawn_refresh());
                tracing::info!(
                    interval_secs = self.inner.refresh_interval.as_secs(),
                    "Auto-refresh enabled"
                );
                true
            }
        }
    }

    fn select(&self, symbol: &str) {
        let mut current = self.inner.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = symbol.to_string();
    }

    /// The task holds a weak reference so dropping the last handle ends it
    fn spawn_refresh(&self) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        let period = self.inner.refresh_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let dashboard = Dashboard { inner };
                let symbol = dashboard.current_symbol();
                tracing::debug!(symbol = %symbol, "Auto-refresh tick");
                dashboard.load_data(&symbol).await;
            }
        })
    }

    fn derive(
        &self,
        symbol: &str,
        quote: Quote,
        hours: MarketHours,
        status: DataStatus,
        source: QuoteSource,
    ) -> Snapshot {
        let info = catalog::lookup(symbol);
        let (indicators, fear_greed, headline) = {
            let mut rng = self.inner.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let indicators = sentiment::derive_indicators(&info, &quote, hours, &mut *rng);
            let fear_greed = sentiment::fear_greed(&mut *rng);
            let headline = news::headline(info.asset_class, &mut *rng);
            (indicators, fear_greed, headline)
        };
        let result = sentiment::score(&quote, &indicators, fear_greed, &self.inner.weights);

        Snapshot {
            symbol: symbol.to_string(),
            quote,
            indicators,
            fear_greed,
            sentiment: result,
            status,
            source,
            headline: headline.to_string(),
            updated_at: Utc::now(),
        }
    }

    /// Publish unless the selection moved on; holds the selection lock so a
    /// concurrent symbol change cannot interleave
    fn publish(&self, snapshot: &Snapshot) -> bool {
        let current = self.inner.current.read().unwrap_or_else(PoisonError::into_inner);
        if *current != snapshot.symbol {
            tracing::debug!(
                symbol = %snapshot.symbol,
                current = %current.as_str(),
                "Discarding result for deselected symbol"
            );
            return false;
        }

        telemetry::record_quote(snapshot.source.label());
        self.inner.snapshots.send_replace(Some(snapshot.clone()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ProviderError, QuoteProvider, RawQuote};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        price: Option<f64>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn ok(price: f64) -> Arc<Self> {
            Arc::new(Self {
                price: Some(price),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                price: None,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            })
        }

        fn slow(price: f64, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                price: Some(price),
                delay,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuoteProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(10)
        }

        async fn fetch(&self, _id: &str) -> Result<RawQuote, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.price
                .map(|price| RawQuote {
                    price,
                    change: 2.0,
                    change_percent: 1.5,
                    ..RawQuote::default()
                })
                .ok_or(ProviderError::Status(502))
        }
    }

    fn dashboard(provider: Arc<StubProvider>, cache_ttl: Duration) -> Dashboard {
        let chain = ProviderChain::new(
            vec![provider as Arc<dyn QuoteProvider>],
            QuoteCache::new(cache_ttl),
        ).with_seed(3);
        let config = DashboardConfig {
            seed: Some(7),
            ..DashboardConfig::default()
        };
        Dashboard::new(chain, &config, ScoringWeights::default())
    }

    #[tokio::test]
    async fn test_initial_state() {
        let d = dashboard(StubProvider::ok(1.0), Duration::from_secs(30));
        assert_eq!(d.current_symbol(), "NASDAQ:IXIC");
        assert!(d.snapshot().is_none());
        assert_eq!(d.status(), DataStatus::Connecting);
        assert!(!d.auto_refresh_enabled());
    }

    #[tokio::test]
    async fn test_load_live_quote() {
        let provider = StubProvider::ok(18000.0);
        let d = dashboard(provider.clone(), Duration::from_secs(30));

        let snapshot = d.load_data("NASDAQ:IXIC").await;

        assert_eq!(snapshot.status, DataStatus::Live);
        assert_eq!(snapshot.source, QuoteSource::Provider("stub".to_string()));
        assert_eq!(snapshot.quote.price, 18000.0);
        assert_eq!(snapshot.quote.description, "NASDAQ Composite");
        assert_eq!(d.snapshot(), Some(snapshot.clone()));
        assert_eq!(d.quote(), Some(snapshot.quote.clone()));
        assert_eq!(d.indicators(), Some(snapshot.indicators));
        assert_eq!(d.sentiment(), Some(snapshot.sentiment.clone()));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_sentiment_matches_published_quote() {
        let d = dashboard(StubProvider::ok(190.0), Duration::from_secs(30));
        let snapshot = d.load_data("NASDAQ:AAPL").await;

        let expected = sentiment::score(
            &snapshot.quote,
            &snapshot.indicators,
            snapshot.fear_greed,
            &ScoringWeights::default(),
        );
        assert_eq!(snapshot.sentiment, expected);
        assert!(snapshot.sentiment.reasons.len() <= sentiment::MAX_REASONS);
    }

    #[tokio::test]
    async fn test_all_providers_fail_falls_back_to_simulation() {
        let d = dashboard(StubProvider::failing(), Duration::from_secs(30));

        let snapshot = d.change_symbol("BINANCE:BTCUSDT").await;

        assert_eq!(snapshot.status, DataStatus::Simulated);
        assert_eq!(snapshot.source, QuoteSource::Simulator);
        assert!(snapshot.quote.price > 0.0);
        assert_eq!(d.status(), DataStatus::Simulated);
    }

    #[tokio::test]
    async fn test_load_unselected_symbol_not_published() {
        let d = dashboard(StubProvider::ok(3.0), Duration::from_secs(30));

        let snapshot = d.load_data("NASDAQ:AMZN").await;

        assert_eq!(snapshot.status, DataStatus::Live);
        assert_eq!(d.current_symbol(), "NASDAQ:IXIC");
        assert!(d.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_reload_within_ttl_uses_cache() {
        let provider = StubProvider::ok(42.0);
        let d = dashboard(provider.clone(), Duration::from_secs(30));

        d.load_data("TVC:GOLD").await;
        let second = d.load_data("TVC:GOLD").await;

        assert_eq!(second.source, QuoteSource::Cache);
        assert_eq!(second.status, DataStatus::Live);
        assert_eq!(second.quote.price, 42.0);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_placeholder_published_while_connecting() {
        let d = dashboard(
            StubProvider::slow(5.0, Duration::from_secs(1)),
            Duration::from_secs(30),
        );
        let mut rx = d.subscribe();

        let task = tokio::spawn({
            let d = d.clone();
            async move { d.change_symbol("NASDAQ:TSLA").await }
        });

        rx.changed().await.unwrap();
        let placeholder = rx.borrow_and_update().clone().unwrap();
        assert_eq!(placeholder.status, DataStatus::Connecting);
        assert_eq!(placeholder.source, QuoteSource::Simulator);

        let live = task.await.unwrap();
        assert_eq!(live.status, DataStatus::Live);
        assert_eq!(live.quote.price, 5.0);
        assert_eq!(d.status(), DataStatus::Live);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_symbol_result_discarded() {
        let d = dashboard(
            StubProvider::slow(5.0, Duration::from_secs(1)),
            Duration::from_secs(30),
        );

        let first = tokio::spawn({
            let d = d.clone();
            async move { d.change_symbol("NASDAQ:AAPL").await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        let second = d.change_symbol("NASDAQ:MSFT").await;
        let first = first.await.unwrap();

        assert_eq!(first.symbol, "NASDAQ:AAPL");
        assert_eq!(second.symbol, "NASDAQ:MSFT");
        let published = d.snapshot().unwrap();
        assert_eq!(published.symbol, "NASDAQ:MSFT");
        assert_eq!(published.status, DataStatus::Live);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_refresh_toggle() {
        let provider = StubProvider::ok(10.0);
        let d = dashboard(provider.clone(), Duration::ZERO);

        assert!(d.toggle_auto_refresh());
        assert!(d.auto_refresh_enabled());

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(provider.calls(), 1);
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(provider.calls(), 2);
        assert_eq!(d.snapshot().unwrap().symbol, "NASDAQ:IXIC");

        assert!(!d.toggle_auto_refresh());
        assert!(!d.auto_refresh_enabled());
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_refresh_interval_still_reloads() {
        let provider = StubProvider::ok(10.0);
        let chain = ProviderChain::new(
            vec![provider.clone() as Arc<dyn QuoteProvider>],
            QuoteCache::new(Duration::ZERO),
        );
        let config = DashboardConfig {
            refresh_interval_secs: 0,
            seed: Some(7),
            ..DashboardConfig::default()
        };
        let d = Dashboard::new(chain, &config, ScoringWeights::default());

        assert!(d.toggle_auto_refresh());
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(provider.calls(), 2);
        assert!(d.auto_refresh_enabled());
        assert_eq!(d.snapshot().unwrap().status, DataStatus::Live);
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_symbol_rearms_refresh() {
        let provider = StubProvider::ok(10.0);
        let d = dashboard(provider.clone(), Duration::ZERO);
        d.toggle_auto_refresh();

        tokio::time::sleep(Duration::from_secs(20)).await;
        d.change_symbol("TVC:SILVER").await;
        assert!(d.auto_refresh_enabled());
        assert_eq!(provider.calls(), 1);

        // Timer restarted at t=20s, so nothing fires at t=30s
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(provider.calls(), 1);
        tokio::time::sleep(Duration::from_secs(16)).await;
        assert_eq!(provider.calls(), 2);
        assert_eq!(d.snapshot().unwrap().symbol, "TVC:SILVER");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_dashboard_stops_refresh() {
        let provider = StubProvider::ok(10.0);
        let d = dashboard(provider.clone(), Duration::ZERO);
        d.toggle_auto_refresh();
        drop(d);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_quote_source_labels() {
        assert_eq!(QuoteSource::Cache.label(), "cache");
        assert_eq!(QuoteSource::Provider("yahoo".to_string()).to_string(), "yahoo");
        assert_eq!(QuoteSource::Simulator.to_string(), "simulator");
        assert_eq!(DataStatus::Simulated.to_string(), "Simulated");
    }
}
