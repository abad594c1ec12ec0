/// Clamp-and-interpolate `value` onto [0, 1] over the span [min, max].
///
/// Caller guarantees `min < max` and finite inputs.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if value <= min {
        0.0
    } else if value >= max {
        1.0
    } else {
        (value - min) / (max - min)
    }
}

/// Relative Strength Index over the trailing `period` using simple rolling
/// means of gains and losses.
///
/// Caller supplies at least `period + 1` closes. A zero average loss maps to
/// 100 when any gain exists and 50 otherwise, so the function is total.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    let deltas: Vec<f64> = closes.windows(2).map(|pair| pair[1] - pair[0]).collect();
    if period == 0 || deltas.len() < period {
        return 50.0;
    }

    let tail = &deltas[deltas.len() - period..];
    let avg_gain = tail.iter().map(|d| d.max(0.0)).sum::<f64>() / period as f64;
    let avg_loss = tail.iter().map(|d| (-d).max(0.0)).sum::<f64>() / period as f64;

    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 50.0 };
    }

    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
