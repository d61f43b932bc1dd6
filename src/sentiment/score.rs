//! Additive sentiment scoring
//!
//! Each rule contributes points and, when it fires, a human-readable reason.
//! Rules run in a fixed order (price, RSI, MACD, moving average, fear/greed)
//! and the reasons keep that order.

use super::indicators::{Indicators, MacdSignal, MovingAverageSignal};
use crate::quote::Quote;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of reasons kept in a [`SentimentResult`]
pub const MAX_REASONS: usize = 3;

/// Point weights and thresholds for [`score`]
///
/// Defaults are the tuned constants of the dashboard. Any field may be
/// overridden from the `[scoring]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Change percent separating a strong from a mild move
    pub strong_move_pct: f64,
    pub strong_move_points: i32,
    pub mild_move_points: i32,
    /// RSI below this is oversold
    pub rsi_oversold: f64,
    /// RSI above this is overbought
    pub rsi_overbought: f64,
    pub rsi_extreme_points: i32,
    pub rsi_neutral_points: i32,
    pub macd_points: i32,
    pub moving_average_points: i32,
    /// Fear/greed below this is extreme fear
    pub extreme_fear: u8,
    /// Fear/greed above this is extreme greed
    pub extreme_greed: u8,
    pub fear_greed_points: i32,
    /// Minimum score for each bucket, from strongest to weakest
    pub strong_buy_min: i32,
    pub buy_min: i32,
    pub hold_min: i32,
    pub sell_min: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            strong_move_pct: 1.0,
            strong_move_points: 30,
            mild_move_points: 15,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_extreme_points: 20,
            rsi_neutral_points: 5,
            macd_points: 15,
            moving_average_points: 10,
            extreme_fear: 25,
            extreme_greed: 75,
            fear_greed_points: 15,
            strong_buy_min: 25,
            buy_min: 10,
            hold_min: -10,
            sell_min: -25,
        }
    }
}

/// Recommendation bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Recommendation {
    /// Bucket a total score; every lower bound is inclusive
    pub fn from_score(score: i32, weights: &ScoringWeights) -> Self {
        if score >= weights.strong_buy_min {
            Self::StrongBuy
        } else if score >= weights.buy_min {
            Self::Buy
        } else if score >= weights.hold_min {
            Self::Hold
        } else if score >= weights.sell_min {
            Self::Sell
        } else {
            Self::StrongSell
        }
    }

    pub fn sentiment(&self) -> Sentiment {
        match self {
            Self::StrongBuy | Self::Buy => Sentiment::Buy,
            Self::Hold => Sentiment::Hold,
            Self::Sell | Self::StrongSell => Sentiment::Sell,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StrongBuy => "STRONG BUY",
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::StrongSell => "STRONG SELL",
        })
    }
}

/// Coarse sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Buy,
    Hold,
    Sell,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
        })
    }
}

/// Scoring outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub recommendation: Recommendation,
    pub sentiment: Sentiment,
    pub score: i32,
    /// Justifications in rule order, at most [`MAX_REASONS`]
    pub reasons: Vec<String>,
}

/// Score a quote with its indicators and fear/greed reading
pub fn score(
    quote: &Quote,
    indicators: &Indicators,
    fear_greed: u8,
    weights: &ScoringWeights,
) -> SentimentResult {
    let mut total = 0;
    let mut reasons: Vec<&'static str> = Vec::with_capacity(5);

    // A flat move (exactly 0%) counts as negative
    let pct = quote.change_percent;
    if pct > weights.strong_move_pct {
        total += weights.strong_move_points;
        reasons.push("Strong positive price movement");
    } else if pct > 0.0 {
        total += weights.mild_move_points;
        reasons.push("Positive price movement");
    } else if pct < -weights.strong_move_pct {
        total -= weights.strong_move_points;
        reasons.push("Significant price decline");
    } else {
        total -= weights.mild_move_points;
        reasons.push("Negative price movement");
    }

    if indicators.rsi < weights.rsi_oversold {
        total += weights.rsi_extreme_points;
        reasons.push("RSI indicates oversold condition (potential buying opportunity)");
    } else if indicators.rsi > weights.rsi_overbought {
        total -= weights.rsi_extreme_points;
        reasons.push("RSI indicates overbought condition");
    } else {
        total += weights.rsi_neutral_points;
        reasons.push("RSI in neutral range");
    }

    match indicators.macd {
        MacdSignal::Bullish => {
            total += weights.macd_points;
            reasons.push("MACD showing bullish momentum");
        }
        MacdSignal::Bearish => {
            total -= weights.macd_points;
            reasons.push("MACD showing bearish momentum");
        }
    }

    match indicators.moving_average {
        MovingAverageSignal::Bullish => {
            total += weights.moving_average_points;
            reasons.push("Price above moving average");
        }
        MovingAverageSignal::Bearish => {
            total -= weights.moving_average_points;
            reasons.push("Price below moving average");
        }
        MovingAverageSignal::Neutral => {}
    }

    if fear_greed < weights.extreme_fear {
        total += weights.fear_greed_points;
        reasons.push("Extreme fear presents buying opportunities");
    } else if fear_greed > weights.extreme_greed {
        total -= weights.fear_greed_points;
        reasons.push("Extreme greed suggests caution");
    }

    let recommendation = Recommendation::from_score(total, weights);

    SentimentResult {
        recommendation,
        sentiment: recommendation.sentiment(),
        score: total,
        reasons: reasons
            .into_iter()
            .take(MAX_REASONS)
            .map(str::to_string)
            .collect(),
    }
}
