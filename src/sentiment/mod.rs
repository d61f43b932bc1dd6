//! Indicator and sentiment engine
//!
//! Derives pseudo-technical indicators and a fear/greed reading for a quote,
//! then scores them into a buy/hold/sell recommendation. Every call is a
//! fresh computation; nothing carries over between quotes.

mod fear_greed;
mod indicators;
mod score;

pub use fear_greed::{fear_greed, FearGreedBand};
pub use indicators::{
    derive_indicators, BandSignal, Indicators, MacdSignal, MovingAverageSignal,
};
pub use score::{score, Recommendation, Sentiment, SentimentResult, ScoringWeights, MAX_REASONS};
