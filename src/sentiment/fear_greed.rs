//! Fear/greed gauge

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Draw a fear/greed reading, uniform over 0..100
pub fn fear_greed<R: Rng>(rng: &mut R) -> u8 {
    rng.random_range(0..100)
}

/// Gauge band for a fear/greed reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FearGreedBand {
    ExtremeFear,
    Fear,
    Greed,
    ExtremeGreed,
}

impl FearGreedBand {
    /// Band boundaries are inclusive on the upper side: 25 is still extreme fear
    pub fn from_value(value: u8) -> Self {
        match value {
            0..=25 => Self::ExtremeFear,
            26..=50 => Self::Fear,
            51..=75 => Self::Greed,
            _ => Self::ExtremeGreed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ExtremeFear => "Extreme Fear",
            Self::Fear => "Fear",
            Self::Greed => "Greed",
            Self::ExtremeGreed => "Extreme Greed",
        }
    }

    /// Gauge needle angle in degrees, -90 (0) through 90 (100)
    pub fn needle_rotation(value: u8) -> f64 {
        let v = f64::from(value.min(100));
        match Self::from_value(value) {
            Self::ExtremeFear => -90.0 + (v / 25.0) * 45.0,
            Self::Fear => -45.0 + ((v - 25.0) / 25.0) * 45.0,
            Self::Greed => ((v - 50.0) / 25.0) * 45.0,
            Self::ExtremeGreed => 45.0 + ((v - 75.0) / 25.0) * 45.0,
        }
    }
}

impl fmt::Display for FearGreedBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
