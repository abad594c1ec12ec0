use itertools::Itertools;
use statrs::statistics::Statistics;

use crate::data::{ConsolidationZone, ScoreSeries};

/// Detect low-volatility zones in the smoothed series.
///
/// A day is consolidating when the rolling max-min range over `window` days
/// sits below `threshold`. Maximal contiguous runs of at least `min_length`
/// days become zones; shorter runs are discarded outright, never merged with
/// neighbors.
pub fn find_consolidation_zones(
    smoothed: &ScoreSeries,
    threshold: f64,
    window: usize,
    min_length: usize,
) -> Vec<ConsolidationZone> {
    let n = smoothed.len();
    if n == 0 || window == 0 || n < window {
        return Vec::new();
    }

    let mut consolidating = vec![false; n];
    for i in window - 1..n {
        let slice = &smoothed.values[i + 1 - window..=i];
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for value in slice {
            max = max.max(*value);
            min = min.min(*value);
        }
        consolidating[i] = max - min < threshold;
    }

    let mut zones = Vec::new();
    for (flag, run) in &consolidating
        .iter()
        .enumerate()
        .group_by(|(_, flag)| **flag)
    {
        if !flag {
            continue;
        }
        let indices: Vec<usize> = run.map(|(i, _)| i).collect();
        if indices.len() < min_length {
            continue;
        }
        let start = indices[0];
        let end = *indices.last().unwrap();
        zones.push(ConsolidationZone {
            start: smoothed.dates[start],
            end: smoothed.dates[end],
            days: end - start + 1,
            level: smoothed.values[start..=end].iter().mean(),
        });
    }

    zones
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(values: Vec<f64>) -> ScoreSeries {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let dates = start.iter_days().take(values.len()).collect();
        ScoreSeries::new(dates, values)
    }

    #[test]
    fn flat_then_volatile_yields_one_zone_in_the_flat_half() {
        let mut values = vec![55.0; 20];
        values.extend((0..20).map(|i| if i % 2 == 0 { 20.0 } else { 90.0 }));
        let smoothed = series(values);

        let zones = find_consolidation_zones(&smoothed, 5.0, 10, 5);
        assert_eq!(zones.len(), 1);

        let zone = &zones[0];
        assert!(zone.days >= 5);
        assert!(zone.end < smoothed.dates[20]);
        assert!((zone.level - 55.0).abs() < 1e-9);
    }

    #[test]
    fn trailing_quiet_run_is_emitted() {
        let mut values: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 20.0 } else { 90.0 }).collect();
        values.extend(vec![48.0; 20]);
        let zones = find_consolidation_zones(&series(values), 5.0, 10, 5);
        assert_eq!(zones.len(), 1);
        assert!((zones[0].level - 48.0).abs() < 1e-9);
    }

    #[test]
    fn short_runs_are_discarded() {
        // Quiet patch of 12 days gives only 3 in-range rolling windows.
        let mut values: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 20.0 } else { 90.0 }).collect();
        values.extend(vec![50.0; 12]);
        values.extend((0..14).map(|i| if i % 2 == 0 { 20.0 } else { 90.0 }));
        assert!(find_consolidation_zones(&series(values), 5.0, 10, 5).is_empty());
    }

    #[test]
    fn empty_series_yields_nothing() {
        assert!(find_consolidation_zones(&ScoreSeries::empty(), 5.0, 10, 5).is_empty());
    }
}
