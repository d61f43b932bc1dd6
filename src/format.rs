//! Display formatting for quote values

use crate::catalog::AssetClass;

/// Insert `,` every three digits of the integer part of a decimal string
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Two decimals with thousands separators: `12,345.68`
pub fn format_number(value: f64) -> String {
    group_thousands(&format!("{value:.2}"))
}

/// `1.2B`, `3.4M`, else a grouped integer
pub fn format_volume(volume: f64) -> String {
    if volume >= 1e9 {
        format!("{:.1}B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("{:.1}M", volume / 1e6)
    } else {
        group_thousands(&format!("{volume:.0}"))
    }
}

/// `$1.2T`, `$3.4B`, else `$` and a grouped integer
pub fn format_market_cap(cap: f64) -> String {
    if cap >= 1e12 {
        format!("${:.1}T", cap / 1e12)
    } else if cap >= 1e9 {
        format!("${:.1}B", cap / 1e9)
    } else {
        format!("${}", group_thousands(&format!("{cap:.0}")))
    }
}

/// Price digits for an asset class
///
/// Sub-dollar crypto gets 6 decimals, cheap commodities 3, large values are
/// grouped.
pub fn format_price(price: f64, asset_class: AssetClass) -> String {
    match asset_class {
        AssetClass::Crypto if price < 1.0 => format!("{price:.6}"),
        AssetClass::Commodity if price < 10.0 => format!("{price:.3}"),
        _ if price > 10_000.0 => format_number(price),
        _ => format!("{price:.2}"),
    }
}

/// Display symbol for an ISO currency code; unknown codes are shown as-is
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "KRW" => "₩",
        "HKD" => "HK$",
        "AUD" => "A$",
        other => other,
    }
}

/// Signed change with percentage: `+$12.34 (+0.56%)`, `-€1,200.00 (-1.10%)`
pub fn format_change(change: f64, change_percent: f64, currency: &str) -> String {
    let sign = if change >= 0.0 { '+' } else { '-' };
    let pct_sign = if change_percent >= 0.0 { "+" } else { "" };
    format!(
        "{sign}{}{} ({pct_sign}{change_percent:.2}%)",
        currency_symbol(currency),
        format_number(change.abs()),
    )
}
