use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::NaiveDate;
use csv::StringRecord;
use thiserror::Error;

use crate::data::PriceBar;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no price history file for symbol {symbol:?} under {dir:?}")]
    MissingSymbol { symbol: String, dir: PathBuf },

    #[error("price history for {symbol:?} contains no valid rows")]
    Empty { symbol: String },

    #[error("unable to infer date from record: {0:?}")]
    Date(StringRecord),

    #[error("failed to parse numeric field '{field}' from value '{value}'")]
    ParseNumber { field: &'static str, value: String },

    #[error("duplicate or unordered date {date} in history for {symbol:?}")]
    Unordered { symbol: String, date: NaiveDate },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Daily price-history source.
///
/// Implementations return the bars with dates in the half-open range
/// `[start, end)`, ascending. Failures here are absorbed by the scoring layer
/// as neutral fallbacks, never surfaced past it.
pub trait PriceHistory {
    fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, HistoryError>;
}

/// Provider backed by one CSV file per symbol (`<dir>/<SYMBOL>.csv`).
///
/// Files are parsed once per run and served from an in-memory cache; computed
/// scores themselves are never cached.
pub struct CsvHistory {
    dir: PathBuf,
    cache: RefCell<HashMap<String, Rc<Vec<PriceBar>>>>,
}

impl CsvHistory {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn load_symbol(&self, symbol: &str) -> Result<Rc<Vec<PriceBar>>, HistoryError> {
        if let Some(bars) = self.cache.borrow().get(symbol) {
            return Ok(Rc::clone(bars));
        }

        let path = self.dir.join(format!("{symbol}.csv"));
        if !path.exists() {
            return Err(HistoryError::MissingSymbol {
                symbol: symbol.to_string(),
                dir: self.dir.clone(),
            });
        }

        let file = File::open(&path)?;
        let bars = Rc::new(parse_bars(file, symbol)?);
        self.cache
            .borrow_mut()
            .insert(symbol.to_string(), Rc::clone(&bars));
        Ok(bars)
    }
}

impl PriceHistory for CsvHistory {
    fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, HistoryError> {
        let bars = self.load_symbol(symbol)?;
        Ok(filter_range(&bars, start, end))
    }
}

/// Bars with dates in `[start, end)`.
pub fn filter_range(bars: &[PriceBar], start: NaiveDate, end: NaiveDate) -> Vec<PriceBar> {
    bars.iter()
        .filter(|bar| bar.date >= start && bar.date < end)
        .cloned()
        .collect()
}

/// Parse daily OHLCV rows from CSV.
///
/// Accepts yfinance-style exports: an optional header, then
/// `date,open,high,low,close[,adj close],volume`. Volume is taken from the
/// last field so the adjusted-close column, when present, is ignored.
pub fn parse_bars<R: Read>(reader: R, symbol: &str) -> Result<Vec<PriceBar>, HistoryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut bars = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if let Some(bar) = parse_record(&record)? {
            bars.push(bar);
        }
    }

    if bars.is_empty() {
        return Err(HistoryError::Empty {
            symbol: symbol.to_string(),
        });
    }

    bars.sort_by_key(|bar| bar.date);
    for pair in bars.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(HistoryError::Unordered {
                symbol: symbol.to_string(),
                date: pair[1].date,
            });
        }
    }

    Ok(bars)
}

fn parse_record(record: &StringRecord) -> Result<Option<PriceBar>, HistoryError> {
    // Skip header rows by checking the first field.
    if let Some(first) = record.get(0) {
        if first.trim().eq_ignore_ascii_case("date") {
            return Ok(None);
        }
    }

    let fields: Vec<&str> = record
        .iter()
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();
    if fields.len() < 6 {
        return Ok(None);
    }

    let date = parse_date(fields[0]).ok_or_else(|| HistoryError::Date(record.clone()))?;
    let open = parse_number(fields[1], "open")?;
    let high = parse_number(fields[2], "high")?;
    let low = parse_number(fields[3], "low")?;
    let close = parse_number(fields[4], "close")?;
    let volume = parse_number(fields[fields.len() - 1], "volume")?;

    Ok(Some(PriceBar {
        date,
        open,
        high,
        low,
        close,
        volume,
    }))
}

fn parse_number(value: &str, field: &'static str) -> Result<f64, HistoryError> {
    value
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| HistoryError::ParseNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let patterns = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    patterns
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(value, pattern).ok())
}

/// Fixed in-memory price history, for tests.
#[cfg(test)]
pub struct InMemoryHistory {
    pub bars: HashMap<String, Vec<PriceBar>>,
}

#[cfg(test)]
impl InMemoryHistory {
    pub fn single(symbol: &str, bars: Vec<PriceBar>) -> Self {
        let mut map = HashMap::new();
        map.insert(symbol.to_string(), bars);
        Self { bars: map }
    }
}

#[cfg(test)]
impl PriceHistory for InMemoryHistory {
    fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>, HistoryError> {
        let bars = self
            .bars
            .get(symbol)
            .ok_or_else(|| HistoryError::MissingSymbol {
                symbol: symbol.to_string(),
                dir: PathBuf::from("<memory>"),
            })?;
        Ok(filter_range(bars, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_six_column_rows_with_header() {
        let csv = "\
Date,Open,High,Low,Close,Volume
2024-01-02,100.0,101.5,99.0,101.0,1200000
2024-01-03,101.0,102.0,100.5,101.8,\"1,350,000\"
";
        let bars = parse_bars(Cursor::new(csv), "TEST").unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert!((bars[1].volume - 1_350_000.0).abs() < 1e-6);
    }

    #[test]
    fn parses_seven_column_rows_ignoring_adj_close() {
        let csv = "2024-01-02,100.0,101.5,99.0,101.0,100.2,1200000\n";
        let bars = parse_bars(Cursor::new(csv), "TEST").unwrap();
        assert_eq!(bars.len(), 1);
        assert!((bars[0].close - 101.0).abs() < 1e-9);
        assert!((bars[0].volume - 1_200_000.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_files_with_no_valid_rows() {
        let err = parse_bars(Cursor::new("Date,Open,High,Low,Close,Volume\n"), "TEST");
        assert!(matches!(err, Err(HistoryError::Empty { .. })));
    }

    #[test]
    fn rejects_bad_numeric_fields() {
        let csv = "2024-01-02,abc,101.5,99.0,101.0,1200000\n";
        let err = parse_bars(Cursor::new(csv), "TEST");
        assert!(matches!(
            err,
            Err(HistoryError::ParseNumber { field: "open", .. })
        ));
    }

    #[test]
    fn range_filter_is_half_open() {
        let bars: Vec<PriceBar> = (1..=10)
            .map(|day| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                volume: 1.0,
            })
            .collect();
        let start = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let filtered = filter_range(&bars, start, end);
        assert_eq!(filtered.len(), 4);
        assert_eq!(filtered.first().unwrap().date, start);
        assert!(filtered.last().unwrap().date < end);
    }
}
