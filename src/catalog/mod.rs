//! Symbol catalog
//!
//! Static per-instrument parameters used by the simulator and the indicator
//! engine, display metadata, and conversion of exchange-qualified identifiers
//! (e.g. "NASDAQ:IXIC") into the symbols each quote provider expects.

pub mod news;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset class of an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Index,
    Stock,
    Crypto,
    Commodity,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Index => "index",
            AssetClass::Stock => "stock",
            AssetClass::Crypto => "crypto",
            AssetClass::Commodity => "commodity",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simulation parameters for one instrument
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    /// Reference price the simulator perturbs around
    pub base_price: f64,
    /// Daily volatility factor (0.02 = 2%)
    pub volatility: f64,
    /// Asset class
    pub asset_class: AssetClass,
}

/// Entry returned for identifiers missing from the catalog
pub const DEFAULT_SYMBOL_INFO: SymbolInfo = SymbolInfo {
    base_price: 100.0,
    volatility: 0.02,
    asset_class: AssetClass::Index,
};

/// Display metadata for one instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMeta {
    pub name: String,
    pub currency: String,
    pub exchange: String,
}

/// A catalog row
struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    currency: &'static str,
    info: SymbolInfo,
    /// Yahoo Finance symbol, when it differs from the ticker part
    yahoo: Option<&'static str>,
}

const fn entry(
    id: &'static str,
    name: &'static str,
    currency: &'static str,
    base_price: f64,
    volatility: f64,
    asset_class: AssetClass,
    yahoo: Option<&'static str>,
) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        currency,
        info: SymbolInfo {
            base_price,
            volatility,
            asset_class,
        },
        yahoo,
    }
}

use self::AssetClass::{Commodity, Crypto, Index, Stock};

static CATALOG: &[CatalogEntry] = &[
    // US markets
    entry("NASDAQ:IXIC", "NASDAQ Composite", "USD", 15000.0, 0.02, Index, Some("^IXIC")),
    entry("SP:SPX", "S&P 500", "USD", 4500.0, 0.015, Index, Some("^GSPC")),
    entry("DJ:DJI", "Dow Jones Industrial Average", "USD", 35000.0, 0.015, Index, Some("^DJI")),
    entry("TVC:RUT", "Russell 2000", "USD", 2000.0, 0.025, Index, Some("^RUT")),
    // European markets
    entry("TVC:UKX", "FTSE 100", "GBP", 7500.0, 0.018, Index, Some("^FTSE")),
    entry("TVC:DAX", "DAX", "EUR", 16000.0, 0.02, Index, Some("^GDAXI")),
    entry("TVC:CAC", "CAC 40", "EUR", 7200.0, 0.018, Index, Some("^FCHI")),
    entry("TVC:AEX", "AEX", "EUR", 800.0, 0.02, Index, Some("^AEX")),
    // Asian markets
    entry("TVC:NI225", "Nikkei 225", "JPY", 30000.0, 0.02, Index, Some("^N225")),
    entry("TVC:HSI", "Hang Seng", "HKD", 20000.0, 0.025, Index, Some("^HSI")),
    entry("TVC:SHCOMP", "Shanghai Composite", "CNY", 3200.0, 0.022, Index, Some("000001.SS")),
    entry("TVC:KOSPI", "KOSPI", "KRW", 2600.0, 0.02, Index, Some("^KS11")),
    entry("TVC:XJO", "ASX 200", "AUD", 7000.0, 0.018, Index, Some("^AXJO")),
    // Individual stocks
    entry("NASDAQ:AAPL", "Apple Inc.", "USD", 180.0, 0.03, Stock, None),
    entry("NASDAQ:MSFT", "Microsoft Corporation", "USD", 350.0, 0.025, Stock, None),
    entry("NASDAQ:GOOGL", "Alphabet Inc.", "USD", 130.0, 0.028, Stock, None),
    entry("NASDAQ:AMZN", "Amazon.com Inc.", "USD", 140.0, 0.03, Stock, None),
    entry("NASDAQ:TSLA", "Tesla Inc.", "USD", 250.0, 0.05, Stock, None),
    entry("NASDAQ:NVDA", "NVIDIA Corporation", "USD", 450.0, 0.04, Stock, None),
    // Commodities
    entry("TVC:GOLD", "Gold", "USD", 2000.0, 0.015, Commodity, Some("GC=F")),
    entry("TVC:SILVER", "Silver", "USD", 24.0, 0.025, Commodity, Some("SI=F")),
    entry("NYMEX:CL1!", "Crude Oil", "USD", 75.0, 0.03, Commodity, Some("CL=F")),
    entry("NYMEX:NG1!", "Natural Gas", "USD", 3.5, 0.04, Commodity, Some("NG=F")),
    // Cryptocurrencies
    entry("BINANCE:BTCUSDT", "Bitcoin", "USDT", 65000.0, 0.06, Crypto, Some("BTC-USD")),
    entry("BINANCE:ETHUSDT", "Ethereum", "USDT", 3500.0, 0.07, Crypto, Some("ETH-USD")),
    entry("BINANCE:BNBUSDT", "BNB", "USDT", 320.0, 0.05, Crypto, Some("BNB-USD")),
    entry("BINANCE:ADAUSDT", "Cardano", "USDT", 0.8, 0.08, Crypto, Some("ADA-USD")),
];

fn find(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == id)
}

/// Look up simulation parameters; unknown identifiers get [`DEFAULT_SYMBOL_INFO`]
pub fn lookup(id: &str) -> SymbolInfo {
    find(id).map(|e| e.info).unwrap_or(DEFAULT_SYMBOL_INFO)
}

/// Whether the identifier is part of the catalog
pub fn contains(id: &str) -> bool {
    find(id).is_some()
}

/// Display metadata; unknown identifiers are named after their ticker part
pub fn meta(id: &str) -> SymbolMeta {
    match find(id) {
        Some(e) => SymbolMeta {
            name: e.name.to_string(),
            currency: e.currency.to_string(),
            exchange: exchange(id).to_string(),
        },
        None => SymbolMeta {
            name: short_symbol(id).to_string(),
            currency: "USD".to_string(),
            exchange: exchange(id).to_string(),
        },
    }
}

/// All catalog identifiers with their parameters, in catalog order
pub fn symbols() -> impl Iterator<Item = (&'static str, &'static str, SymbolInfo)> {
    CATALOG.iter().map(|e| (e.id, e.name, e.info))
}

/// Ticker part of an exchange-qualified identifier ("NASDAQ:AAPL" -> "AAPL")
pub fn short_symbol(id: &str) -> &str {
    match id.split_once(':') {
        Some((_, ticker)) if !ticker.is_empty() => ticker,
        _ => id,
    }
}

/// Exchange prefix of an identifier, empty when unqualified
pub fn exchange(id: &str) -> &str {
    id.split_once(':').map(|(ex, _)| ex).unwrap_or("")
}

/// Symbol understood by Yahoo Finance's chart endpoint
pub fn yahoo_symbol(id: &str) -> String {
    find(id)
        .and_then(|e| e.yahoo)
        .unwrap_or_else(|| short_symbol(id))
        .to_string()
}

/// Symbol understood by Finnhub's quote endpoint
///
/// Finnhub only takes caret-prefixed index symbols for the three US
/// benchmarks; everything else goes by its ticker part.
pub fn finnhub_symbol(id: &str) -> String {
    match id {
        "NASDAQ:IXIC" => "^IXIC".to_string(),
        "SP:SPX" => "^GSPC".to_string(),
        "DJ:DJI" => "^DJI".to_string(),
        _ => short_symbol(id).to_string(),
    }
}

/// Symbol understood by Alpha Vantage's global quote endpoint
pub fn alphavantage_symbol(id: &str) -> String {
    short_symbol(id).to_string()
}
