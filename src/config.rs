use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser};

/// Command-line configuration for the sentiment mapping tool.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["symbol", "sector", "industry"]),
))]
pub struct AppConfig {
    /// Directory holding one daily OHLCV CSV file per symbol.
    #[arg(short = 'd', long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Single instrument symbol to analyze.
    #[arg(short = 's', long)]
    pub symbol: Option<String>,

    /// Sector name, analyzed through its ETF proxy.
    #[arg(long)]
    pub sector: Option<String>,

    /// Industry name, analyzed as a peer-group average.
    #[arg(long)]
    pub industry: Option<String>,

    /// Analysis window length in calendar days.
    #[arg(long, default_value_t = 180)]
    pub days: i64,

    /// Last day of the analysis window (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end_date: Option<NaiveDate>,

    /// Centered smoothing window for the trend line, in days.
    #[arg(long, default_value_t = 10)]
    pub smoothing_window: usize,

    /// Rolling window for the slope (trend strength) series, in days.
    #[arg(long, default_value_t = 5)]
    pub trend_window: usize,

    /// Support/resistance tolerance band around each extremum, in points.
    #[arg(long, default_value_t = 2)]
    pub sr_tolerance: i64,

    /// Minimum extremum touches for a level to qualify.
    #[arg(long, default_value_t = 3)]
    pub min_touches: usize,

    /// Minimum separation between adjacent extrema, in days.
    #[arg(long, default_value_t = 5)]
    pub peak_separation: usize,

    /// Rolling score range below which a day counts as consolidating.
    #[arg(long, default_value_t = 5.0)]
    pub consolidation_threshold: f64,

    /// Rolling range window for consolidation detection, in days.
    #[arg(long, default_value_t = 10)]
    pub consolidation_window: usize,

    /// Minimum length of a consolidation zone, in days.
    #[arg(long, default_value_t = 5)]
    pub min_zone_length: usize,

    /// Inflections below this strength are hidden from the report.
    #[arg(long, default_value_t = 0.5)]
    pub min_inflection_strength: f64,

    /// Peer instruments averaged for an industry series.
    #[arg(long, default_value_t = 3)]
    pub max_peers: usize,

    /// Write the full analysis as JSON to this path.
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}
