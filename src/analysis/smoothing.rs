use statrs::statistics::Statistics;

use crate::data::ScoreSeries;

/// Centered rolling mean over `window` days.
///
/// Even windows lean one extra slot to the left. Edge positions where the
/// centered window would run past either boundary are backward-filled then
/// forward-filled, so the output has the input's length with no gaps. Series
/// shorter than the window are returned unchanged.
pub fn smooth(series: &ScoreSeries, window: usize) -> ScoreSeries {
    let n = series.len();
    if window <= 1 || n < window {
        return series.clone();
    }

    let left = window / 2;
    let right = window - 1 - left;
    let mut values = vec![f64::NAN; n];
    for i in left..n.saturating_sub(right) {
        values[i] = series.values[i - left..=i + right].iter().mean();
    }
    fill_edges(&mut values);

    ScoreSeries::new(series.dates.clone(), values)
}

/// Local trend velocity: first difference of the smoothed series followed by
/// a rolling mean of width `window`. Leading entries (including the position
/// lost to differencing) are NaN.
pub fn trend_strength(smoothed: &ScoreSeries, window: usize) -> ScoreSeries {
    let n = smoothed.len();
    let mut values = vec![f64::NAN; n];
    if window == 0 {
        return ScoreSeries::new(smoothed.dates.clone(), values);
    }

    for i in window..n {
        let sum: f64 = (i + 1 - window..=i)
            .map(|j| smoothed.values[j] - smoothed.values[j - 1])
            .sum();
        values[i] = sum / window as f64;
    }

    ScoreSeries::new(smoothed.dates.clone(), values)
}

fn fill_edges(values: &mut [f64]) {
    if let Some(first) = values.iter().position(|v| !v.is_nan()) {
        let fill = values[first];
        for value in &mut values[..first] {
            *value = fill;
        }
    }
    let mut last = f64::NAN;
    for value in values.iter_mut() {
        if value.is_nan() {
            if !last.is_nan() {
                *value = last;
            }
        } else {
            last = *value;
        }
    }
}
