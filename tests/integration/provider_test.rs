//! Provider integration tests against a mock HTTP server

use market_sentiment::cache::QuoteCache;
use market_sentiment::config::{ProviderKind, ProvidersConfig};
use market_sentiment::provider::{
    AlphaVantageProvider, FinnhubProvider, ProviderChain, ProviderError, QuoteProvider,
    TradingViewProvider, YahooProvider,
};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn chart_body(price: f64, previous_close: f64) -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "meta": {
                    "currency": "USD",
                    "longName": "Apple Inc.",
                    "regularMarketPrice": price,
                    "chartPreviousClose": previous_close,
                    "regularMarketVolume": 51000000
                }
            }],
            "error": null
        }
    })
}

fn providers_config(server: &MockServer, order: Vec<ProviderKind>) -> ProvidersConfig {
    ProvidersConfig {
        order,
        proxy_base_url: server.uri(),
        tradingview_url: server.uri(),
        yahoo_url: format!("{}/chart", server.uri()),
        proxy_timeout_ms: 300,
        tradingview_timeout_ms: 300,
        yahoo_timeout_ms: 300,
    }
}

#[tokio::test]
async fn test_yahoo_proxy_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/yahoo/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(190.0, 200.0)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = YahooProvider::proxy(Client::new(), &server.uri(), TIMEOUT);
    let raw = assert_ok!(provider.fetch("NASDAQ:AAPL").await);

    assert_eq!(raw.price, 190.0);
    assert_eq!(raw.change, -10.0);
    assert!((raw.change_percent + 5.0).abs() < 1e-9);
    assert_eq!(raw.volume, Some(5.1e7));
    assert_eq!(raw.description.as_deref(), Some("Apple Inc."));
}

#[tokio::test]
async fn test_yahoo_direct_maps_commodity_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chart/GC=F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(2010.0, 2000.0)))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/chart", server.uri());
    let provider = YahooProvider::direct(Client::new(), &base, TIMEOUT);
    let raw = provider.fetch("TVC:GOLD").await.unwrap();
    assert_eq!(raw.price, 2010.0);
}

#[tokio::test]
async fn test_alphavantage_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alphavantage/MSFT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Global Quote": {
                "01. symbol": "MSFT",
                "05. price": "410.5000",
                "09. change": "-2.2500",
                "10. change percent": "-0.5451%"
            }
        })))
        .mount(&server)
        .await;

    let provider = AlphaVantageProvider::new(Client::new(), &server.uri(), TIMEOUT);
    let raw = assert_ok!(provider.fetch("NASDAQ:MSFT").await);

    assert_eq!(raw.price, 410.5);
    assert_eq!(raw.change, -2.25);
    assert_eq!(raw.change_percent, -0.5451);
}

#[tokio::test]
async fn test_alphavantage_rate_limit_note() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."
        })))
        .mount(&server)
        .await;

    let provider = AlphaVantageProvider::new(Client::new(), &server.uri(), TIMEOUT);
    let err = assert_err!(provider.fetch("NASDAQ:MSFT").await);
    assert!(matches!(err, ProviderError::Malformed(msg) if msg.contains("call frequency")));
}

#[tokio::test]
async fn test_finnhub_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/finnhub/TSLA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "c": 251.2, "d": 3.1, "dp": 1.25, "h": 252.0, "l": 245.0, "o": 247.0, "pc": 248.1
        })))
        .mount(&server)
        .await;

    let provider = FinnhubProvider::new(Client::new(), &server.uri(), TIMEOUT);
    let raw = provider.fetch("NASDAQ:TSLA").await.unwrap();
    assert_eq!(raw.price, 251.2);
    assert_eq!(raw.change_percent, 1.25);
}

#[tokio::test]
async fn test_tradingview_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/symbol"))
        .and(query_param("symbol", "BINANCE:ETHUSDT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "close_price": 2650.4,
                "change": -40.1,
                "change_percent": -1.49,
                "volume": 1.8e9,
                "currency_code": "USDT",
                "description": "Ethereum / TetherUS"
            }]
        })))
        .mount(&server)
        .await;

    let provider = TradingViewProvider::new(Client::new(), &server.uri(), TIMEOUT);
    let raw = provider.fetch("BINANCE:ETHUSDT").await.unwrap();
    assert_eq!(raw.price, 2650.4);
    assert_eq!(raw.currency.as_deref(), Some("USDT"));
}

#[tokio::test]
async fn test_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let provider = FinnhubProvider::new(Client::new(), &server.uri(), TIMEOUT);
    let err = assert_err!(provider.fetch("NASDAQ:AAPL").await);
    assert!(matches!(err, ProviderError::Status(429)));
}

#[tokio::test]
async fn test_chain_falls_through_to_first_working_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/yahoo/AAPL"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/alphavantage/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Note": "rate limited"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/finnhub/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"c": 188.0, "d": 1.0, "dp": 0.53})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/symbol"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = providers_config(
        &server,
        vec![
            ProviderKind::YahooProxy,
            ProviderKind::AlphaVantageProxy,
            ProviderKind::FinnhubProxy,
            ProviderKind::TradingView,
            ProviderKind::Yahoo,
        ],
    );
    let chain = ProviderChain::from_config(&config, QuoteCache::default())
        .unwrap()
        .with_seed(1);

    let hit = chain.fetch_quote("NASDAQ:AAPL").await.unwrap();

    assert_eq!(hit.provider, "finnhub-proxy");
    assert_eq!(hit.quote.price, 188.0);
    assert_eq!(hit.quote.description, "Apple Inc.");
    assert!(hit.quote.market_cap > 0.0);
    let skipped: Vec<_> = hit.failures.iter().map(|f| f.provider.as_str()).collect();
    assert_eq!(skipped, vec!["yahoo-proxy", "alphavantage-proxy"]);
    assert_eq!(chain.cache().get("NASDAQ:AAPL").await, Some(hit.quote));
}

#[tokio::test]
async fn test_chain_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/yahoo/AAPL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chart_body(1.0, 1.0))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/chart/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(191.0, 190.0)))
        .mount(&server)
        .await;

    let config = providers_config(&server, vec![ProviderKind::YahooProxy, ProviderKind::Yahoo]);
    let chain = ProviderChain::from_config(&config, QuoteCache::default()).unwrap();

    let hit = chain.fetch_quote("NASDAQ:AAPL").await.unwrap();

    assert_eq!(hit.provider, "yahoo");
    assert_eq!(hit.quote.price, 191.0);
    assert!(matches!(hit.failures[0].error, ProviderError::Timeout(_)));
}

#[tokio::test]
async fn test_chain_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = providers_config(&server, ProvidersConfig::default().order);
    let chain = ProviderChain::from_config(&config, QuoteCache::default()).unwrap();

    let err = chain.fetch_quote("NASDAQ:IXIC").await.unwrap_err();
    assert_eq!(err.attempts.len(), 5);
    assert!(err
        .attempts
        .iter()
        .all(|a| matches!(a.error, ProviderError::Status(503))));
    assert!(chain.cache().is_empty().await);
}
