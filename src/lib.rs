//! market-sentiment: market sentiment dashboard core
//!
//! This library provides the core components for:
//! - A symbol catalog with per-provider symbol conversion
//! - A short-lived quote cache
//! - An ordered chain of third-party quote providers, first success wins
//! - A market simulator used as placeholder and fallback
//! - Synthetic indicators, fear/greed gauge and buy/hold/sell scoring
//! - The dashboard state object tying them together
//! - Structured logging and Prometheus metrics

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod provider;
pub mod quote;
pub mod sentiment;
pub mod simulator;
pub mod telemetry;
