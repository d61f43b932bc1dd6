//! CLI interface for market-sentiment
//!
//! Provides subcommands for:
//! - `quote`: Load one symbol and print its snapshot
//! - `watch`: Auto-refresh a symbol and print every update
//! - `symbols`: List the symbol catalog
//! - `config`: Show the effective configuration

mod quote;
mod render;
mod watch;

pub use quote::QuoteArgs;
pub use render::SnapshotView;
pub use watch::WatchArgs;

use crate::catalog;
use crate::config::Config;
use crate::dashboard::Snapshot;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "market-sentiment")]
#[command(about = "Market sentiment dashboard: quotes, indicators and a buy/hold/sell call")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load one symbol and print its snapshot
    Quote(QuoteArgs),
    /// Auto-refresh a symbol and print every update
    Watch(WatchArgs),
    /// List the symbol catalog
    Symbols,
    /// Show the effective configuration
    Config,
}

/// Explicit symbol or the configured default; unknown symbols are allowed
pub(crate) fn resolve_symbol(symbol: Option<&str>, config: &Config) -> String {
    let symbol = symbol.unwrap_or(&config.dashboard.default_symbol).to_string();
    if !catalog::contains(&symbol) {
        tracing::warn!(symbol = %symbol, "Symbol not in catalog, using default parameters");
    }
    symbol
}

/// Print a snapshot as one JSON line or as the text view
pub(crate) fn print_snapshot(snapshot: &Snapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        println!("{}", SnapshotView(snapshot));
    }
    Ok(())
}
