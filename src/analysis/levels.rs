use std::collections::BTreeMap;

use crate::data::{Level, LevelKind, NEUTRAL_SCORE};

/// Minimum spacing, in days, between adjacent extrema.
pub const PEAK_SEPARATION: usize = 5;

/// Detect support/resistance levels from repeated extremum touches.
///
/// Every peak and trough credits one touch to each integer level within
/// `tolerance` of its rounded score; integer bands are counted independently
/// and adjacent qualifying levels are deliberately not merged. Output is
/// ascending by level value.
pub fn find_levels(
    values: &[f64],
    separation: usize,
    tolerance: i64,
    min_touches: usize,
) -> Vec<Level> {
    let (peaks, troughs) = local_extrema(values, separation);

    let mut touch_counts: BTreeMap<i64, usize> = BTreeMap::new();
    for idx in peaks.iter().chain(troughs.iter()) {
        let rounded = values[*idx].round() as i64;
        for level in rounded - tolerance..=rounded + tolerance {
            *touch_counts.entry(level).or_default() += 1;
        }
    }

    touch_counts
        .into_iter()
        .filter(|(_, touches)| *touches >= min_touches)
        .map(|(level, touches)| Level {
            value: level as f64,
            touches,
            kind: if level as f64 > NEUTRAL_SCORE {
                LevelKind::Resistance
            } else {
                LevelKind::Support
            },
        })
        .collect()
}

/// Indices of local maxima and minima under a strict-dominance window.
///
/// A point qualifies only when strictly greater (respectively less) than
/// every in-bounds neighbor within `separation` positions on both sides;
/// series endpoints never qualify.
fn local_extrema(values: &[f64], separation: usize) -> (Vec<usize>, Vec<usize>) {
    let n = values.len();
    let mut peaks = Vec::new();
    let mut troughs = Vec::new();
    if n < 3 {
        return (peaks, troughs);
    }

    for i in 1..n - 1 {
        let lo = i.saturating_sub(separation);
        let hi = (i + separation).min(n - 1);
        let mut is_peak = true;
        let mut is_trough = true;
        for j in lo..=hi {
            if j == i {
                continue;
            }
            if values[j] >= values[i] {
                is_peak = false;
            }
            if values[j] <= values[i] {
                is_trough = false;
            }
            if !is_peak && !is_trough {
                break;
            }
        }
        if is_peak {
            peaks.push(i);
        } else if is_trough {
            troughs.push(i);
        }
    }

    (peaks, troughs)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Baseline with a spike of `height` at each requested index.
    fn spiky(len: usize, baseline: f64, spikes: &[(usize, f64)]) -> Vec<f64> {
        let mut values = vec![baseline; len];
        for (idx, height) in spikes {
            values[*idx] = *height;
        }
        values
    }

    #[test]
    fn three_clean_peaks_form_a_resistance_level() {
        let values = spiky(40, 55.0, &[(6, 82.0), (18, 82.0), (30, 82.0)]);
        let levels = find_levels(&values, PEAK_SEPARATION, 2, 3);

        let hit = levels
            .iter()
            .find(|l| (80.0..=84.0).contains(&l.value) && l.touches >= 3)
            .expect("expected a resistance level near 82");
        assert_eq!(hit.kind, LevelKind::Resistance);
    }

    #[test]
    fn repeated_troughs_form_a_support_level() {
        let values = spiky(40, 45.0, &[(6, 22.0), (18, 22.0), (30, 22.0)]);
        let levels = find_levels(&values, PEAK_SEPARATION, 2, 3);

        let hit = levels
            .iter()
            .find(|l| (20.0..=24.0).contains(&l.value))
            .expect("expected a support level near 22");
        assert_eq!(hit.kind, LevelKind::Support);
        assert!(hit.touches >= 3);
    }

    #[test]
    fn levels_are_sorted_ascending() {
        let values = spiky(
            60,
            50.0,
            &[(6, 22.0), (18, 22.0), (30, 22.0), (40, 82.0), (48, 82.0), (56, 82.0)],
        );
        let levels = find_levels(&values, PEAK_SEPARATION, 2, 3);
        assert!(!levels.is_empty());
        for pair in levels.windows(2) {
            assert!(pair[0].value < pair[1].value);
        }
    }

    #[test]
    fn too_few_touches_yields_nothing() {
        let values = spiky(40, 55.0, &[(10, 82.0), (25, 82.0)]);
        assert!(find_levels(&values, PEAK_SEPARATION, 2, 3).is_empty());
    }

    #[test]
    fn extrema_respect_minimum_separation() {
        // Two bumps 3 days apart: only the taller one can dominate its window.
        let values = spiky(20, 50.0, &[(8, 80.0), (11, 78.0)]);
        let (peaks, _) = local_extrema(&values, PEAK_SEPARATION);
        assert_eq!(peaks, vec![8]);
    }
}
