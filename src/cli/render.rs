//! Terminal rendering of dashboard snapshots

use crate::catalog;
use crate::dashboard::{DataStatus, Snapshot};
use crate::format;
use crate::sentiment::FearGreedBand;
use std::fmt;

/// Cells in the fear/greed gauge bar
const GAUGE_WIDTH: usize = 21;

/// Fear/greed gauge as a text bar, the needle `o` placed by its rotation
fn gauge(value: u8) -> String {
    let rotation = FearGreedBand::needle_rotation(value);
    let slot = ((rotation + 90.0) / 180.0 * (GAUGE_WIDTH - 1) as f64).round() as usize;
    let bar: String = (0..GAUGE_WIDTH)
        .map(|i| if i == slot { 'o' } else { '.' })
        .collect();
    format!("[{bar}]")
}

/// Text view of a [`Snapshot`]
pub struct SnapshotView<'a>(pub &'a Snapshot);

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let quote = &s.quote;
        let info = catalog::lookup(&s.symbol);
        let meta = catalog::meta(&s.symbol);
        let currency = format::currency_symbol(&quote.currency);

        writeln!(
            f,
            "{} ({}) · {} · {}",
            quote.description,
            catalog::short_symbol(&s.symbol),
            meta.exchange,
            quote.currency
        )?;
        writeln!(
            f,
            "  Price        {}{}  {} {}",
            currency,
            format::format_price(quote.price, info.asset_class),
            if quote.is_up() { '▲' } else { '▼' },
            format::format_change(quote.change, quote.change_percent, &quote.currency)
        )?;
        writeln!(
            f,
            "  Volume       {}  Market cap {}",
            format::format_volume(quote.volume),
            format::format_market_cap(quote.market_cap)
        )?;
        match s.status {
            DataStatus::Live => writeln!(f, "  Status       {} ({})", s.status, s.source)?,
            _ => writeln!(f, "  Status       {}", s.status)?,
        }
        writeln!(
            f,
            "  Indicators   RSI {:.1}  MACD {}  MA {}  Bollinger {}",
            s.indicators.rsi,
            s.indicators.macd,
            s.indicators.moving_average,
            s.indicators.bollinger_bands
        )?;
        writeln!(
            f,
            "  Fear & Greed {} ({}) {}",
            s.fear_greed,
            FearGreedBand::from_value(s.fear_greed),
            gauge(s.fear_greed)
        )?;
        writeln!(
            f,
            "  Outlook      {} (score {})",
            s.sentiment.recommendation, s.sentiment.score
        )?;
        for reason in &s.sentiment.reasons {
            writeln!(f, "    - {reason}")?;
        }
        writeln!(f, "  News         {}", s.headline)?;
        write!(f, "  Updated      {}", s.updated_at.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}
