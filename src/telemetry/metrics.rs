//! Prometheus metrics

use std::time::Duration;

pub const PROVIDER_LATENCY: &str = "market_sentiment_provider_latency_ms";
pub const PROVIDER_FAILURES: &str = "market_sentiment_provider_failures_total";
pub const QUOTES: &str = "market_sentiment_quotes_total";
pub const CACHE_HITS: &str = "market_sentiment_cache_hits_total";

/// Record how long one provider attempt took, successful or not
pub fn record_provider_latency(provider: &str, duration: Duration) {
    metrics::histogram!(PROVIDER_LATENCY, "provider" => provider.to_string())
        .record(duration.as_secs_f64() * 1000.0);
}

pub fn record_provider_failure(provider: &str) {
    metrics::counter!(PROVIDER_FAILURES, "provider" => provider.to_string()).increment(1);
}

/// Count a published quote by where it came from (`cache`, provider name, `simulator`)
pub fn record_quote(source: &str) {
    metrics::counter!(QUOTES, "source" => source.to_string()).increment(1);
}

pub fn record_cache_hit() {
    metrics::counter!(CACHE_HITS).increment(1);
}
