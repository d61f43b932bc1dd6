//! Quote command implementation

use crate::cache::QuoteCache;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::provider::ProviderChain;
use clap::Args;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Exchange-qualified symbol, e.g. NASDAQ:AAPL (defaults to the configured symbol)
    pub symbol: Option<String>,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the quote providers and use simulated data
    #[arg(long)]
    pub offline: bool,
}

impl QuoteArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let dashboard = if self.offline {
            let cache = QuoteCache::new(config.dashboard.cache_ttl());
            let chain = ProviderChain::new(Vec::new(), cache);
            Dashboard::new(chain, &config.dashboard, config.scoring.clone())
        } else {
            Dashboard::from_config(config)?
        };

        let symbol = super::resolve_symbol(self.symbol.as_deref(), config);
        let snapshot = dashboard.change_symbol(&symbol).await;

        super::print_snapshot(&snapshot, self.json)
    }
}
