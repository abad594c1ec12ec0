use chrono::{Duration, NaiveDate};
use statrs::statistics::Statistics;

use crate::analysis::{normalize, rsi};
use crate::data::{DailyScore, NeutralReason, PriceBar};
use crate::provider::PriceHistory;

/// Calendar days of history fetched ahead of the target date.
const LOOKBACK_CALENDAR_DAYS: i64 = 30;
/// Trading sessions the composite is computed over.
const SESSION_WINDOW: usize = 20;
/// Sessions in the recent-volume numerator.
const RECENT_VOLUME_SESSIONS: usize = 5;
const RSI_PERIOD: usize = 14;

const MOMENTUM_WEIGHT: f64 = 0.40;
const RSI_WEIGHT: f64 = 0.30;
const VOLUME_WEIGHT: f64 = 0.20;
const VOLATILITY_WEIGHT: f64 = 0.10;

/// Composite fear/greed score for one instrument on one date.
///
/// Uses the trailing 20 sessions ending strictly before `date`. Fewer than 20
/// sessions, or any provider failure, degrades to the tagged neutral fallback
/// rather than an error; adjacent dates are unaffected.
pub fn daily_score(provider: &dyn PriceHistory, symbol: &str, date: NaiveDate) -> DailyScore {
    let start = date - Duration::days(LOOKBACK_CALENDAR_DAYS);
    let bars = match provider.fetch_history(symbol, start, date) {
        Ok(bars) => bars,
        Err(_) => return DailyScore::Neutral(NeutralReason::FetchFailure),
    };
    if bars.len() < SESSION_WINDOW {
        return DailyScore::Neutral(NeutralReason::InsufficientHistory);
    }

    let window = &bars[bars.len() - SESSION_WINDOW..];
    DailyScore::Scored(composite_score(window))
}

/// Weighted momentum/RSI/volume/volatility composite, clamped to [0, 100].
pub fn composite_score(bars: &[PriceBar]) -> f64 {
    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    let returns: Vec<f64> = closes
        .windows(2)
        .map(|pair| if pair[0] != 0.0 { pair[1] / pair[0] - 1.0 } else { 0.0 })
        .collect();

    // Momentum: 20x the mean daily return, mapped onto [-1, 1].
    let avg_return = returns.iter().mean();
    let price_score = normalize(avg_return * SESSION_WINDOW as f64, -1.0, 1.0) * 100.0;

    let rsi_score = rsi(&closes, RSI_PERIOD);

    // Volume: recent 5-session mean relative to the full-window mean.
    let volumes: Vec<f64> = bars.iter().map(|bar| bar.volume).collect();
    let avg_volume = volumes.iter().mean();
    let recent_volume = volumes[volumes.len().saturating_sub(RECENT_VOLUME_SESSIONS)..]
        .iter()
        .mean();
    let volume_ratio = if avg_volume > 0.0 {
        recent_volume / avg_volume
    } else {
        1.0
    };
    let volume_score = normalize(volume_ratio - 1.0, -0.5, 0.5) * 100.0;

    // Volatility, inverted: calm tape scores high.
    let volatility = returns.iter().std_dev();
    let volatility_score = 100.0 - normalize(volatility, 0.01, 0.05) * 100.0;

    let composite = MOMENTUM_WEIGHT * price_score
        + RSI_WEIGHT * rsi_score
        + VOLUME_WEIGHT * volume_score
        + VOLATILITY_WEIGHT * volatility_score;
    composite.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{HistoryError, InMemoryHistory};

    struct FailingHistory;

    impl PriceHistory for FailingHistory {
        fn fetch_history(
            &self,
            symbol: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<Vec<PriceBar>, HistoryError> {
            Err(HistoryError::Empty {
                symbol: symbol.to_string(),
            })
        }
    }

    fn bars_from(closes: &[f64], volume: f64) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        start
            .iter_days()
            .zip(closes.iter())
            .map(|(date, close)| PriceBar {
                date,
                open: *close,
                high: close + 1.0,
                low: close - 1.0,
                close: *close,
                volume,
            })
            .collect()
    }

    #[test]
    fn composite_stays_in_bounds_for_extreme_inputs() {
        let surging: Vec<f64> = (0..20).map(|i| 100.0 * 1.2_f64.powi(i)).collect();
        let crashing: Vec<f64> = (0..20).map(|i| 100.0 * 0.8_f64.powi(i)).collect();
        for closes in [surging, crashing] {
            let score = composite_score(&bars_from(&closes, 1_000.0));
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn flat_market_with_zero_volume_scores_midrange() {
        // All sub-scores hit their defined fallbacks: RSI 50, ratio 1.0.
        let score = composite_score(&bars_from(&[100.0; 20], 0.0));
        assert!(score > 40.0 && score < 80.0);
    }

    #[test]
    fn insufficient_history_falls_back_to_neutral() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let provider = InMemoryHistory::single("AAA", bars_from(&closes, 500.0));
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let score = daily_score(&provider, "AAA", date);
        assert_eq!(score, DailyScore::Neutral(NeutralReason::InsufficientHistory));
        assert_eq!(score.value(), 50.0);
    }

    #[test]
    fn fetch_failure_falls_back_to_neutral() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let score = daily_score(&FailingHistory, "AAA", date);
        assert_eq!(score, DailyScore::Neutral(NeutralReason::FetchFailure));
        assert_eq!(score.value(), 50.0);
    }

    #[test]
    fn uses_only_sessions_before_the_target_date() {
        // 25 sessions; the bar on the target date itself must be excluded.
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let bars = bars_from(&closes, 500.0);
        let target = bars[24].date;
        let provider = InMemoryHistory::single("AAA", bars);

        match daily_score(&provider, "AAA", target) {
            DailyScore::Scored(value) => assert!((0.0..=100.0).contains(&value)),
            other => panic!("expected a computed score, got {other:?}"),
        }
    }

    #[test]
    fn steady_rally_scores_greedy() {
        // ~1% daily gains on flat volume: strong momentum, max RSI.
        let closes: Vec<f64> = (0..20).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let score = composite_score(&bars_from(&closes, 1_000.0));
        assert!(score > 60.0);
    }
}
