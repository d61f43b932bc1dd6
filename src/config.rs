//! Configuration types for market-sentiment

use crate::provider::{TRADINGVIEW_SCANNER_URL, YAHOO_CHART_URL};
use crate::sentiment::ScoringWeights;
pub use crate::telemetry::LogFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted auto-refresh period (one day)
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 86_400;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub scoring: ScoringWeights,
    pub telemetry: TelemetryConfig,
}

/// Dashboard behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Instrument selected at startup
    #[serde(default = "default_symbol")]
    pub default_symbol: String,

    /// Quote cache time-to-live (seconds)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Auto-refresh period (seconds)
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Seed for simulation and indicator randomness; entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_symbol() -> String {
    "NASDAQ:IXIC".to_string()
}
fn default_cache_ttl_secs() -> u64 {
    30
}
fn default_refresh_interval_secs() -> u64 {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_symbol: default_symbol(),
            cache_ttl_secs: default_cache_ttl_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            seed: None,
        }
    }
}

impl DashboardConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Auto-refresh period, clamped to 1s..=[`MAX_REFRESH_INTERVAL_SECS`]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.clamp(1, MAX_REFRESH_INTERVAL_SECS))
    }
}

/// Quote provider identifiers, as written in `providers.order`
///
/// Names match the provider names used in logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    YahooProxy,
    #[serde(rename = "alphavantage-proxy")]
    AlphaVantageProxy,
    FinnhubProxy,
    #[serde(rename = "tradingview")]
    TradingView,
    Yahoo,
}

/// Quote provider chain configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    /// Providers in attempt order; omit one to disable it
    #[serde(default = "default_order")]
    pub order: Vec<ProviderKind>,

    /// Base URL of the proxy serving `/api/yahoo`, `/api/alphavantage`, `/api/finnhub`
    #[serde(default = "default_proxy_base_url")]
    pub proxy_base_url: String,

    /// TradingView scanner base URL
    #[serde(default = "default_tradingview_url")]
    pub tradingview_url: String,

    /// Yahoo Finance chart base URL
    #[serde(default = "default_yahoo_url")]
    pub yahoo_url: String,

    /// Deadline for each proxied provider (milliseconds)
    #[serde(default = "default_proxy_timeout_ms")]
    pub proxy_timeout_ms: u64,

    /// Deadline for the TradingView provider (milliseconds)
    #[serde(default = "default_tradingview_timeout_ms")]
    pub tradingview_timeout_ms: u64,

    /// Deadline for the direct Yahoo provider (milliseconds)
    #[serde(default = "default_yahoo_timeout_ms")]
    pub yahoo_timeout_ms: u64,
}

fn default_order() -> Vec<ProviderKind> {
    vec![
        ProviderKind::YahooProxy,
        ProviderKind::AlphaVantageProxy,
        ProviderKind::FinnhubProxy,
        ProviderKind::TradingView,
        ProviderKind::Yahoo,
    ]
}
fn default_proxy_base_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_tradingview_url() -> String {
    TRADINGVIEW_SCANNER_URL.to_string()
}
fn default_yahoo_url() -> String {
    YAHOO_CHART_URL.to_string()
}
fn default_proxy_timeout_ms() -> u64 {
    5000
}
fn default_tradingview_timeout_ms() -> u64 {
    3000
}
fn default_yahoo_timeout_ms() -> u64 {
    2000
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            proxy_base_url: default_proxy_base_url(),
            tradingview_url: default_tradingview_url(),
            yahoo_url: default_yahoo_url(),
            proxy_timeout_ms: default_proxy_timeout_ms(),
            tradingview_timeout_ms: default_tradingview_timeout_ms(),
            yahoo_timeout_ms: default_yahoo_timeout_ms(),
        }
    }
}

impl ProvidersConfig {
    pub fn proxy_timeout(&self) -> Duration {
        Duration::from_millis(self.proxy_timeout_ms)
    }

    pub fn tradingview_timeout(&self) -> Duration {
        Duration::from_millis(self.tradingview_timeout_ms)
    }

    pub fn yahoo_timeout(&self) -> Duration {
        Duration::from_millis(self.yahoo_timeout_ms)
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot run
    pub fn validate(&self) -> anyhow::Result<()> {
        let refresh = self.dashboard.refresh_interval_secs;
        if refresh == 0 || refresh > MAX_REFRESH_INTERVAL_SECS {
            anyhow::bail!(
                "dashboard.refresh_interval_secs must be between 1 and {}, got {}",
                MAX_REFRESH_INTERVAL_SECS,
                refresh
            );
        }
        Ok(())
    }
}
