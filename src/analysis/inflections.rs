use crate::data::{InflectionKind, InflectionPoint, ScoreSeries};

/// Detect trend inflections as sign changes in the slope series.
///
/// Undefined slope entries count as sign zero, so the first defined slope
/// registers a (neutral) event. Classification looks one step either side of
/// the change; every sign change is emitted and strength filtering is left to
/// the presentation layer.
pub fn find_inflection_points(
    smoothed: &ScoreSeries,
    slopes: &ScoreSeries,
) -> Vec<InflectionPoint> {
    debug_assert_eq!(smoothed.len(), slopes.len());

    let defined = |v: f64| if v.is_nan() { 0.0 } else { v };
    let mut inflections = Vec::new();

    for i in 1..slopes.len() {
        if sign(slopes.values[i]) == sign(slopes.values[i - 1]) {
            continue;
        }

        let prev_slope = defined(slopes.values[i - 1]);
        let next_slope = slopes.values.get(i + 1).copied().map(defined).unwrap_or(0.0);

        let kind = if prev_slope < 0.0 && next_slope > 0.0 {
            InflectionKind::Bottom
        } else if prev_slope > 0.0 && next_slope < 0.0 {
            InflectionKind::Top
        } else {
            InflectionKind::Neutral
        };

        inflections.push(InflectionPoint {
            date: smoothed.dates[i],
            value: smoothed.values[i],
            kind,
            strength: (next_slope - prev_slope).abs(),
        });
    }

    inflections
}

fn sign(value: f64) -> i8 {
    if value.is_nan() || value == 0.0 {
        0
    } else if value > 0.0 {
        1
    } else {
        -1
    }
}
