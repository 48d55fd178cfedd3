use super::*;

#[test]
fn empty_series_is_empty_string() {
    assert_eq!(sparkline(&[]), "");
}

#[test]
fn rising_series_spans_full_range() {
    let line = sparkline(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(line, "▁▂▃▄▅▆▇█");
}

#[test]
fn flat_series_renders_mid_height() {
    assert_eq!(sparkline(&[3.0, 3.0, 3.0]), "▅▅▅");
}

#[test]
fn one_char_per_value() {
    assert_eq!(sparkline(&[5.0, 1.0, 9.0, 2.0]).chars().count(), 4);
}

#[test]
fn non_finite_values_render_lowest() {
    let line: Vec<char> = sparkline(&[1.0, f64::NAN, 2.0]).chars().collect();
    assert_eq!(line, vec!['▁', '▁', '█']);
}

#[test]
fn price_sparkline_keeps_last_points() {
    let history: Vec<PricePoint> = (0..20_u64)
        .map(|tick| {
            #[allow(clippy::cast_precision_loss)]
            let price = tick as f64;
            PricePoint { tick, price, quality_score: 1.0, desirability: 1.0 }
        })
        .collect();
    let line = price_sparkline(&history, 8);
    assert_eq!(line, "▁▂▃▄▅▆▇█");
}
