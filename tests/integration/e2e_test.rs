//! End-to-end integration tests

use market_sentiment::cache::QuoteCache;
use market_sentiment::config::{Config, ProviderKind};
use market_sentiment::dashboard::{Dashboard, DataStatus, QuoteSource};
use market_sentiment::provider::ProviderChain;
use market_sentiment::quote::Quote;
use market_sentiment::sentiment::{
    score, BandSignal, Indicators, MacdSignal, MovingAverageSignal, Recommendation, Sentiment,
    ScoringWeights,
};
use serde_json::json;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    let mut config: Config = toml::from_str(
        r#"
        [dashboard]
        seed = 11

        [telemetry]
        log_level = "warn"
        "#,
    )
    .unwrap();
    config.providers.proxy_base_url = server.uri();
    config.providers.order = vec![ProviderKind::YahooProxy, ProviderKind::FinnhubProxy];
    config
}

fn quote(change_percent: f64) -> Quote {
    Quote {
        price: 15000.0 * (1.0 + change_percent / 100.0),
        change: 150.0 * change_percent,
        change_percent,
        volume: 4.0e9,
        market_cap: 1.8e13,
        currency: "USD".to_string(),
        description: "NASDAQ Composite".to_string(),
    }
}

#[test]
fn test_strong_buy_scenario() {
    let indicators = Indicators {
        rsi: 25.0,
        macd: MacdSignal::Bullish,
        moving_average: MovingAverageSignal::Bullish,
        bollinger_bands: BandSignal::Bullish,
    };

    let result = score(&quote(1.5), &indicators, 20, &ScoringWeights::default());

    assert_eq!(result.score, 90);
    assert_eq!(result.recommendation, Recommendation::StrongBuy);
    assert_eq!(result.sentiment, Sentiment::Buy);
    assert_eq!(result.reasons.len(), 3);
}

#[test]
fn test_strong_sell_scenario() {
    let indicators = Indicators {
        rsi: 80.0,
        macd: MacdSignal::Bearish,
        moving_average: MovingAverageSignal::Bearish,
        bollinger_bands: BandSignal::Bearish,
    };

    let result = score(&quote(-1.5), &indicators, 90, &ScoringWeights::default());

    assert_eq!(result.score, -90);
    assert_eq!(result.recommendation, Recommendation::StrongSell);
    assert_eq!(result.sentiment, Sentiment::Sell);
}

#[tokio::test]
async fn test_dashboard_live_then_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/yahoo/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/finnhub/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"c": 16000.0, "d": 240.0, "dp": 1.52})))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = Dashboard::from_config(&config_for(&server)).unwrap();

    let live = dashboard.load_data("NASDAQ:IXIC").await;
    assert_eq!(live.status, DataStatus::Live);
    assert_eq!(live.source, QuoteSource::Provider("finnhub-proxy".to_string()));
    assert_eq!(live.quote.price, 16000.0);
    assert_eq!(live.quote.description, "NASDAQ Composite");

    let cached = dashboard.load_data("NASDAQ:IXIC").await;
    assert_eq!(cached.source, QuoteSource::Cache);
    assert_eq!(cached.quote, live.quote);
    assert_eq!(dashboard.snapshot(), Some(cached));
}

#[tokio::test]
async fn test_dashboard_simulates_when_providers_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dashboard = Dashboard::from_config(&config_for(&server)).unwrap();
    let snapshot = dashboard.change_symbol("BINANCE:ADAUSDT").await;

    assert_eq!(dashboard.current_symbol(), "BINANCE:ADAUSDT");
    assert_eq!(snapshot.status, DataStatus::Simulated);
    assert_eq!(snapshot.source, QuoteSource::Simulator);
    assert!(snapshot.quote.price > 0.0);
    assert!((0.0..=100.0).contains(&snapshot.indicators.rsi));
    assert!(snapshot.fear_greed < 100);
}

#[tokio::test]
async fn test_offline_dashboard_is_deterministic_per_seed() {
    let mut config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    config.dashboard.seed = Some(5);

    let offline = |config: &Config| {
        let chain = ProviderChain::new(Vec::new(), QuoteCache::new(config.dashboard.cache_ttl()));
        Dashboard::new(chain, &config.dashboard, config.scoring.clone())
    };

    let a = offline(&config).load_data("NASDAQ:NVDA").await;
    let b = offline(&config).load_data("NASDAQ:NVDA").await;

    assert_eq!(a.status, DataStatus::Simulated);
    assert_eq!(a.quote.price, b.quote.price);
    assert_eq!(a.indicators, b.indicators);
    assert_eq!(a.fear_greed, b.fear_greed);
    assert_eq!(a.sentiment, b.sentiment);
}
