//! Watch command implementation

use crate::config::Config;
use crate::dashboard::Dashboard;
use clap::Args;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Exchange-qualified symbol, e.g. BINANCE:BTCUSDT (defaults to the configured symbol)
    pub symbol: Option<String>,

    /// Stop after printing this many snapshots
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: Option<u64>,

    /// Print snapshots as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let dashboard = Dashboard::from_config(config)?;
        let symbol = super::resolve_symbol(self.symbol.as_deref(), config);
        let mut updates = dashboard.subscribe();

        dashboard.toggle_auto_refresh();
        let first = dashboard.change_symbol(&symbol).await;
        super::print_snapshot(&first, self.json)?;
        drop(updates.borrow_and_update());

        let mut printed: u64 = 1;
        while self.count.map_or(true, |limit| printed < limit) {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = updates.borrow_and_update().clone();
                    if let Some(snapshot) = snapshot {
                        super::print_snapshot(&snapshot, self.json)?;
                        printed += 1;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }
        }

        dashboard.toggle_auto_refresh();
        Ok(())
    }
}
