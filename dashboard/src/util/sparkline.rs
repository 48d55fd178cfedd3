//! One-line block-character graphs for price histories.

use crate::net::types::PricePoint;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Scale `values` between their min and max onto eight bar heights.
///
/// A flat series renders at mid height; non-finite values render lowest.
#[must_use]
pub fn sparkline(values: &[f64]) -> String {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = max - min;

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return BARS[0];
            }
            if span <= 0.0 {
                return BARS[BARS.len() / 2];
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            let idx = (((v - min) / span) * (BARS.len() - 1) as f64).round() as usize;
            BARS[idx.min(BARS.len() - 1)]
        })
        .collect()
}

/// Sparkline of the last `width` prices.
#[must_use]
pub fn price_sparkline(history: &[PricePoint], width: usize) -> String {
    let start = history.len().saturating_sub(width);
    let prices: Vec<f64> = history[start..].iter().map(|p| p.price).collect();
    sparkline(&prices)
}

#[cfg(test)]
#[path = "sparkline_test.rs"]
mod sparkline_test;
