//! Configuration file tests

use market_sentiment::config::{Config, LogFormat, ProviderKind};
use std::io::Write;

#[test]
fn test_example_config_loads() {
    let config = Config::load("config.toml.example").unwrap();

    assert_eq!(config.dashboard.default_symbol, "NASDAQ:IXIC");
    assert_eq!(config.dashboard.cache_ttl_secs, 30);
    assert!(config.dashboard.seed.is_none());
    assert_eq!(config.providers.order[0], ProviderKind::YahooProxy);
    assert_eq!(config.providers.order[4], ProviderKind::Yahoo);
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
}

#[test]
fn test_scoring_overrides_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [scoring]
        strong_move_pct = 2.0
        buy_min = 5

        [telemetry]
        log_level = "info"
        log_format = "json"
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.scoring.strong_move_pct, 2.0);
    assert_eq!(config.scoring.buy_min, 5);
    assert_eq!(config.scoring.sell_min, -25);
    assert_eq!(config.telemetry.log_format, LogFormat::Json);
}

#[test]
fn test_invalid_toml_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[dashboard\nseed = ").unwrap();
    assert!(Config::load(file.path()).is_err());
}
