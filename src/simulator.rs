//! Synthetic quote generation
//!
//! Produces a plausible quote from the catalog parameters when no provider
//! answers. Randomness is supplied by the caller so runs can be seeded.

use crate::catalog::{self, AssetClass, SymbolInfo};
use crate::quote::Quote;
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Opening hour of the simulated US session, UTC
const SESSION_OPEN_HOUR_UTC: u32 = 14;
/// Closing hour of the simulated US session, UTC (exclusive)
const SESSION_CLOSE_HOUR_UTC: u32 = 21;
/// Volatility dampening outside the session
const OFF_HOURS_MULTIPLIER: f64 = 0.3;

/// Market-hours heuristic: weekdays, 14:00-21:00 UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketHours {
    pub is_open: bool,
    pub hour: u32,
}

impl MarketHours {
    /// Evaluate the heuristic at a given instant
    pub fn at(now: DateTime<Utc>) -> Self {
        let hour = now.hour();
        let is_weekday = !matches!(now.weekday(), Weekday::Sat | Weekday::Sun);
        let in_session = (SESSION_OPEN_HOUR_UTC..SESSION_CLOSE_HOUR_UTC).contains(&hour);
        Self {
            is_open: is_weekday && in_session,
            hour,
        }
    }

    /// Evaluate the heuristic now
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Volatility scale: full during the session, damped otherwise
    pub fn volatility_multiplier(&self) -> f64 {
        if self.is_open {
            1.0
        } else {
            OFF_HOURS_MULTIPLIER
        }
    }
}

/// Generate a synthetic quote for `id`
///
/// `delta = U(-1,1) * base * volatility * multiplier`; the price is
/// `base + delta` and the change percent is taken relative to `base`.
pub fn simulate<R: Rng>(id: &str, hours: MarketHours, rng: &mut R) -> Quote {
    let info = catalog::lookup(id);
    let meta = catalog::meta(id);
    let volatility = info.volatility * hours.volatility_multiplier();

    let delta = rng.random_range(-1.0..1.0) * info.base_price * volatility;
    let price = info.base_price + delta;

    Quote {
        price,
        change: delta,
        change_percent: delta / info.base_price * 100.0,
        volume: generate_volume(&info, rng),
        market_cap: generate_market_cap(&info, price, rng),
        currency: meta.currency,
        description: meta.name,
    }
}

/// Random traded volume in an asset-class specific range
pub fn generate_volume<R: Rng>(info: &SymbolInfo, rng: &mut R) -> f64 {
    let (low, span) = match info.asset_class {
        AssetClass::Stock => (50_000_000.0, 100_000_000.0),
        AssetClass::Index => (2_000_000_000.0, 5_000_000_000.0),
        AssetClass::Crypto => (1_000_000_000.0, 2_000_000_000.0),
        AssetClass::Commodity => (200_000_000.0, 500_000_000.0),
    };
    low + rng.random::<f64>() * span
}

/// Random market capitalization
///
/// Stocks and crypto scale with `price` (shares outstanding, circulating
/// supply); indices and commodities get a flat aggregate range.
pub fn generate_market_cap<R: Rng>(info: &SymbolInfo, price: f64, rng: &mut R) -> f64 {
    match info.asset_class {
        AssetClass::Stock => price * (5_000_000_000.0 + rng.random::<f64>() * 10_000_000_000.0),
        AssetClass::Crypto => price * (500_000_000.0 + rng.random::<f64>() * 1_000_000_000.0),
        AssetClass::Index | AssetClass::Commodity => {
            15_000_000_000_000.0 + rng.random::<f64>() * 5_000_000_000_000.0
        }
    }
}
