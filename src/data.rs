use chrono::NaiveDate;
use serde::Serialize;

/// Score assigned when no meaningful score can be computed.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Single daily OHLCV bar for one instrument.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Why a day fell back to the neutral score instead of a computed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NeutralReason {
    InsufficientHistory,
    FetchFailure,
}

/// Fear/greed score for one (instrument, date) pair.
///
/// The neutral fallback is tagged with its cause so callers can tell a
/// genuinely neutral market apart from missing data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DailyScore {
    Scored(f64),
    Neutral(NeutralReason),
}

impl DailyScore {
    /// Numeric score in [0, 100]; neutral fallbacks resolve to 50.
    pub fn value(&self) -> f64 {
        match self {
            DailyScore::Scored(value) => *value,
            DailyScore::Neutral(_) => NEUTRAL_SCORE,
        }
    }

    pub fn is_neutral_fallback(&self) -> bool {
        matches!(self, DailyScore::Neutral(_))
    }
}

/// Date-ordered daily score series.
///
/// Carries the raw fear/greed series, its smoothed counterpart, and the slope
/// series alike; slope values may hold leading NaN where the rolling window
/// is incomplete.
#[derive(Debug, Clone)]
pub struct ScoreSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl ScoreSeries {
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Last entry whose value is defined, if any.
    pub fn last_defined(&self) -> Option<(NaiveDate, f64)> {
        self.dates
            .iter()
            .zip(self.values.iter())
            .rev()
            .find(|(_, value)| !value.is_nan())
            .map(|(date, value)| (*date, *value))
    }

    /// Serializable view; NaN entries become nulls.
    pub fn to_points(&self) -> Vec<SeriesPoint> {
        self.dates
            .iter()
            .zip(self.values.iter())
            .map(|(date, value)| SeriesPoint {
                date: *date,
                value: if value.is_nan() { None } else { Some(*value) },
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LevelKind {
    Support,
    Resistance,
}

/// Horizontal score level touched repeatedly by local extrema.
///
/// The kind is positional: levels above the neutral midpoint are labelled
/// resistance, the rest support.
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    pub value: f64,
    pub touches: usize,
    pub kind: LevelKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InflectionKind {
    Bottom,
    Top,
    Neutral,
}

/// Trend reversal detected from a slope sign change.
#[derive(Debug, Clone, Serialize)]
pub struct InflectionPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub kind: InflectionKind,
    pub strength: f64,
}

/// Contiguous stretch where the smoothed score stays in a tight range.
#[derive(Debug, Clone, Serialize)]
pub struct ConsolidationZone {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
    pub level: f64,
}
