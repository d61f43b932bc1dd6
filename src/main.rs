use clap::Parser;
use market_sentiment::catalog;
use market_sentiment::cli::{Cli, Commands};
use market_sentiment::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    let telemetry = market_sentiment::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Quote(args) => {
            tracing::debug!(?args, "Running quote");
            args.execute(&config).await?;
        }
        Commands::Watch(args) => {
            tracing::info!(metrics_addr = ?telemetry.metrics_addr, "Starting watch mode");
            args.execute(&config).await?;
        }
        Commands::Symbols => {
            println!("{:<20} {:<28} {:<10} {:>12} {:>6}", "SYMBOL", "NAME", "CLASS", "BASE", "VOL");
            for (id, name, info) in catalog::symbols() {
                println!(
                    "{:<20} {:<28} {:<10} {:>12.2} {:>5.1}%",
                    id,
                    name,
                    info.asset_class.as_str(),
                    info.base_price,
                    info.volatility * 100.0
                );
            }
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Dashboard: symbol={} cache_ttl={}s refresh={}s seed={:?}",
                config.dashboard.default_symbol,
                config.dashboard.cache_ttl_secs,
                config.dashboard.refresh_interval_secs,
                config.dashboard.seed
            );
            println!("  Providers: {:?}", config.providers.order);
            println!("  Proxy: {}", config.providers.proxy_base_url);
            println!(
                "  Timeouts: proxy={}ms tradingview={}ms yahoo={}ms",
                config.providers.proxy_timeout_ms,
                config.providers.tradingview_timeout_ms,
                config.providers.yahoo_timeout_ms
            );
            println!("  Scoring: {:?}", config.scoring);
            println!(
                "  Telemetry: level={} format={:?} metrics_port={:?}",
                config.telemetry.log_level, config.telemetry.log_format, config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
