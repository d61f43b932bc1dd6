//! Synthetic technical indicators

use crate::catalog::{AssetClass, SymbolInfo};
use crate::quote::Quote;
use crate::simulator::MarketHours;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Change percent beyond which the move biases the indicators
const MOVE_THRESHOLD_PCT: f64 = 1.0;
/// RSI shift applied for a significant move
const MOVE_RSI_SHIFT: f64 = 10.0;
/// Bullish probability shift applied for a significant move
const MOVE_BIAS_SHIFT: f64 = 0.2;
/// Total width of the final RSI jitter (+/- half of this)
const RSI_JITTER: f64 = 20.0;

/// MACD crossover state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdSignal {
    Bullish,
    Bearish,
}

/// Price relative to its moving average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovingAverageSignal {
    Bullish,
    Neutral,
    Bearish,
}

/// Bollinger band position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandSignal {
    Bullish,
    Bearish,
}

macro_rules! impl_signal_display {
    ($ty:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => $label,)+
                })
            }
        }
    };
}

impl_signal_display!(MacdSignal { Bullish => "BULLISH", Bearish => "BEARISH" });
impl_signal_display!(MovingAverageSignal {
    Bullish => "BULLISH",
    Neutral => "NEUTRAL",
    Bearish => "BEARISH",
});
impl_signal_display!(BandSignal { Bullish => "BULLISH", Bearish => "BEARISH" });

/// Indicator set derived for one quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    /// Relative strength index, always within [0, 100]
    pub rsi: f64,
    pub macd: MacdSignal,
    pub moving_average: MovingAverageSignal,
    pub bollinger_bands: BandSignal,
}

/// Derive indicators for a quote
///
/// MACD and moving average are Bernoulli draws against a bullish
/// probability. A move above +1% raises RSI and both bullish probabilities,
/// a move below -1% lowers them by the same amount.
pub fn derive_indicators<R: Rng>(
    info: &SymbolInfo,
    quote: &Quote,
    hours: MarketHours,
    rng: &mut R,
) -> Indicators {
    let mut rsi_base = 50.0;
    let mut macd_bullish = 0.5;
    let mut ma_bullish = 0.6;

    if !hours.is_open {
        rsi_base = 45.0 + rng.random::<f64>() * 10.0;
    }

    match info.asset_class {
        AssetClass::Crypto => {
            rsi_base = if rng.random::<f64>() > 0.5 {
                30.0 + rng.random::<f64>() * 40.0
            } else {
                60.0 + rng.random::<f64>() * 30.0
            };
            macd_bullish = 0.4;
        }
        AssetClass::Commodity => ma_bullish = 0.55,
        AssetClass::Index | AssetClass::Stock => {}
    }

    if quote.change_percent > MOVE_THRESHOLD_PCT {
        rsi_base += MOVE_RSI_SHIFT;
        macd_bullish += MOVE_BIAS_SHIFT;
        ma_bullish += MOVE_BIAS_SHIFT;
    } else if quote.change_percent < -MOVE_THRESHOLD_PCT {
        rsi_base -= MOVE_RSI_SHIFT;
        macd_bullish -= MOVE_BIAS_SHIFT;
        ma_bullish -= MOVE_BIAS_SHIFT;
    }

    let rsi = (rsi_base + (rng.random::<f64>() - 0.5) * RSI_JITTER).clamp(0.0, 100.0);

    let macd = if rng.random::<f64>() < macd_bullish {
        MacdSignal::Bullish
    } else {
        MacdSignal::Bearish
    };

    let moving_average = if rng.random::<f64>() < ma_bullish {
        MovingAverageSignal::Bullish
    } else if rng.random::<f64>() > 0.3 {
        MovingAverageSignal::Neutral
    } else {
        MovingAverageSignal::Bearish
    };

    let bollinger_bands = if rng.random::<f64>() > 0.5 {
        BandSignal::Bullish
    } else {
        BandSignal::Bearish
    };

    Indicators {
        rsi,
        macd,
        moving_average,
        bollinger_bands,
    }
}
