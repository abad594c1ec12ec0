mod analysis;
mod config;
mod data;
mod output;
mod provider;
mod score;
mod series;
mod universe;

use anyhow::{bail, Result};
use chrono::{Duration, Local};
use clap::Parser;
use itertools::Itertools;

use analysis::{find_consolidation_zones, find_inflection_points, find_levels, smooth, trend_strength};
use config::AppConfig;
use data::ScoreSeries;
use output::{print_report, write_json, AnalysisReport};
use provider::CsvHistory;
use series::{average_series, instrument_samples, neutral_fallback_count, to_series};

fn main() -> Result<()> {
    let config = AppConfig::parse();
    run(&config)
}

enum AnalysisTarget {
    Instrument(String),
    PeerGroup {
        name: String,
        symbols: Vec<String>,
    },
}

fn run(config: &AppConfig) -> Result<()> {
    if !config.data_dir.is_dir() {
        bail!("data directory {:?} does not exist", config.data_dir);
    }
    if config.days < 1 {
        bail!("analysis window must cover at least one day");
    }

    let target = resolve_target(config)?;
    let end = config.end_date.unwrap_or_else(|| Local::now().date_naive());
    let start = end - Duration::days(config.days - 1);
    let provider = CsvHistory::new(config.data_dir.clone());

    let (label, raw) = match &target {
        AnalysisTarget::Instrument(symbol) => {
            let samples = instrument_samples(&provider, symbol, start, end);
            println!(
                "Scored {} days for {} spanning {} to {} ({} neutral fallbacks)",
                samples.len(),
                symbol,
                start,
                end,
                neutral_fallback_count(&samples)
            );
            (symbol.clone(), to_series(&samples))
        }
        AnalysisTarget::PeerGroup { name, symbols } => {
            let mut peer_series: Vec<ScoreSeries> = Vec::with_capacity(symbols.len());
            for symbol in symbols {
                let samples = instrument_samples(&provider, symbol, start, end);
                println!(
                    "Scored {} days for {} ({} neutral fallbacks)",
                    samples.len(),
                    symbol,
                    neutral_fallback_count(&samples)
                );
                peer_series.push(to_series(&samples));
            }
            println!("Averaging {} over: {}", name, symbols.iter().join(", "));
            (name.clone(), average_series(&peer_series))
        }
    };

    if raw.is_empty() {
        bail!("analysis window produced an empty series");
    }

    let smoothed = smooth(&raw, config.smoothing_window);
    let slopes = trend_strength(&smoothed, config.trend_window);

    let levels = find_levels(
        &raw.values,
        config.peak_separation,
        config.sr_tolerance,
        config.min_touches,
    );
    let inflections = find_inflection_points(&smoothed, &slopes);
    let zones = find_consolidation_zones(
        &smoothed,
        config.consolidation_threshold,
        config.consolidation_window,
        config.min_zone_length,
    );
    println!(
        "Detected {} levels, {} inflections, {} consolidation zones",
        levels.len(),
        inflections.len(),
        zones.len()
    );

    print_report(
        &label,
        &raw,
        &smoothed,
        &slopes,
        &levels,
        &inflections,
        &zones,
        config.min_inflection_strength,
    );

    if let Some(path) = &config.json {
        let report = AnalysisReport {
            target: &label,
            start,
            end,
            scores: raw.to_points(),
            smoothed: smoothed.to_points(),
            slopes: slopes.to_points(),
            levels: &levels,
            inflections: &inflections,
            zones: &zones,
        };
        write_json(path, &report)?;
        println!("Wrote analysis JSON to {:?}", path);
    }

    Ok(())
}

fn resolve_target(config: &AppConfig) -> Result<AnalysisTarget> {
    if let Some(symbol) = &config.symbol {
        return Ok(AnalysisTarget::Instrument(symbol.clone()));
    }
    if let Some(sector) = &config.sector {
        let Some(etf) = universe::sector_etf(sector) else {
            bail!(
                "unknown sector {:?}; known sectors: {}",
                sector,
                universe::sector_names().join(", ")
            );
        };
        return Ok(AnalysisTarget::Instrument(etf.to_string()));
    }
    if let Some(industry) = &config.industry {
        let Some(peers) = universe::industry_peers(industry) else {
            bail!(
                "unknown industry {:?}; known industries: {}",
                industry,
                universe::industry_names().join(", ")
            );
        };
        let symbols = peers
            .iter()
            .take(config.max_peers)
            .map(|s| s.to_string())
            .collect();
        return Ok(AnalysisTarget::PeerGroup {
            name: industry.clone(),
            symbols,
        });
    }
    bail!("one of --symbol, --sector, or --industry is required");
}
