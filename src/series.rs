use chrono::NaiveDate;

use crate::data::{DailyScore, ScoreSeries};
use crate::provider::PriceHistory;
use crate::score::daily_score;

/// One day's sample in a built series, fallback tag preserved.
#[derive(Debug, Clone)]
pub struct DailySample {
    pub date: NaiveDate,
    pub score: DailyScore,
}

/// Score every calendar day in `[start, end]`, ascending.
///
/// Each day is computed independently against the provider; days without
/// sufficient trailing history land on the tagged neutral fallback, so the
/// output always covers the full range.
pub fn instrument_samples(
    provider: &dyn PriceHistory,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DailySample> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| DailySample {
            date,
            score: daily_score(provider, symbol, date),
        })
        .collect()
}

pub fn to_series(samples: &[DailySample]) -> ScoreSeries {
    ScoreSeries::new(
        samples.iter().map(|s| s.date).collect(),
        samples.iter().map(|s| s.score.value()).collect(),
    )
}

pub fn neutral_fallback_count(samples: &[DailySample]) -> usize {
    samples
        .iter()
        .filter(|s| s.score.is_neutral_fallback())
        .count()
}

/// Elementwise unweighted mean across peer series sharing one date domain.
///
/// All inputs come from `instrument_samples` over the same range, so they are
/// equal length; averaging identical series is the identity.
pub fn average_series(peers: &[ScoreSeries]) -> ScoreSeries {
    let Some(first) = peers.first() else {
        return ScoreSeries::empty();
    };

    let values = (0..first.len())
        .map(|i| {
            let sum: f64 = peers.iter().map(|series| series.values[i]).sum();
            sum / peers.len() as f64
        })
        .collect();

    ScoreSeries::new(first.dates.clone(), values)
}
