//! Normalized quote type

use serde::{Deserialize, Serialize};

/// Price/volume snapshot for one instrument
///
/// Produced either by a quote provider or by the simulator. Every field is
/// populated; values a source cannot supply are zero or synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Last traded price
    pub price: f64,
    /// Absolute change versus previous close
    pub change: f64,
    /// Change versus previous close, in percent (1.5 = +1.5%)
    pub change_percent: f64,
    /// Traded volume, 0 when unknown
    pub volume: f64,
    /// Market capitalization (synthetic for indices and commodities)
    pub market_cap: f64,
    /// ISO currency code
    pub currency: String,
    /// Human-readable instrument name
    pub description: String,
}

impl Quote {
    /// Whether the instrument is up versus previous close
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}
