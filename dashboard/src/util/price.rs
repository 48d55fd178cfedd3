//! Prism price formatting.
//!
//! Prices render with thousands separators and at most two decimals
//! (trailing zeros dropped), and are capped at [`PRICE_CAP`] for display.

/// Largest price shown; anything above renders as the cap.
pub const PRICE_CAP: f64 = 10_000.0;

/// A formatted price and whether the cap was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CappedPrice {
    pub formatted: String,
    pub is_capped: bool,
}

/// Format `price` capped at 10 000, e.g. `1,234.5`.
#[must_use]
pub fn format_price(price: f64) -> String {
    if price.is_nan() {
        return "0".to_string();
    }
    let capped = price.min(PRICE_CAP);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (capped.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let frac = cents % 100;
    let sign = if capped < 0.0 && cents > 0 { "-" } else { "" };

    match frac {
        0 => format!("{sign}{whole}"),
        f if f % 10 == 0 => format!("{sign}{whole}.{}", f / 10),
        f => format!("{sign}{whole}.{f:02}"),
    }
}

#[must_use]
pub fn format_price_with_cap(price: f64) -> CappedPrice {
    CappedPrice { formatted: format_price(price), is_capped: price > PRICE_CAP }
}

/// Formatted price with a ` (capped)` marker when the cap applied.
#[must_use]
pub fn price_display(price: f64) -> String {
    let CappedPrice { formatted, is_capped } = format_price_with_cap(price);
    if is_capped { format!("{formatted} (capped)") } else { formatted }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "price_test.rs"]
mod price_test;
