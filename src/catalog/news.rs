//! Canned market headlines per asset class

use super::AssetClass;
use rand::Rng;

const INDEX_NEWS: [&str; 4] = [
    "Major indices show strong momentum on positive economic data",
    "Federal Reserve policy meeting influences global market sentiment",
    "Quarterly earnings season drives index volatility",
    "Geopolitical tensions create uncertainty in global markets",
];

const STOCK_NEWS: [&str; 4] = [
    "Strong quarterly earnings boost individual stock performance",
    "Sector rotation continues as investors seek growth opportunities",
    "Institutional buying activity increases in technology stocks",
    "Analyst upgrades drive momentum in selected equities",
];

const CRYPTO_NEWS: [&str; 4] = [
    "Regulatory clarity improves cryptocurrency market sentiment",
    "Institutional adoption continues to drive crypto prices",
    "Market volatility reflects ongoing crypto market maturation",
    "DeFi innovations attract increased investor attention",
];

const COMMODITY_NEWS: [&str; 4] = [
    "Supply chain disruptions impact commodity pricing",
    "Weather patterns influence agricultural commodity markets",
    "Industrial demand drives precious metals higher",
    "Energy transition affects traditional commodity sectors",
];

/// Headlines available for an asset class
pub fn headlines(asset_class: AssetClass) -> &'static [&'static str] {
    match asset_class {
        AssetClass::Index => &INDEX_NEWS,
        AssetClass::Stock => &STOCK_NEWS,
        AssetClass::Crypto => &CRYPTO_NEWS,
        AssetClass::Commodity => &COMMODITY_NEWS,
    }
}

/// Pick a random headline relevant to the asset class
pub fn headline<R: Rng>(asset_class: AssetClass, rng: &mut R) -> &'static str {
    let pool = headlines(asset_class);
    pool[rng.random_range(0..pool.len())]
}
