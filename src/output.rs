use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::data::{
    ConsolidationZone, InflectionKind, InflectionPoint, Level, LevelKind, ScoreSeries,
    SeriesPoint, NEUTRAL_SCORE,
};

#[derive(Tabled)]
struct LevelRow {
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Touches")]
    touches: usize,
}

#[derive(Tabled)]
struct InflectionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Strength")]
    strength: String,
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Days")]
    days: usize,
    #[tabled(rename = "Level")]
    level: String,
}

pub fn print_report(
    target: &str,
    series: &ScoreSeries,
    smoothed: &ScoreSeries,
    slopes: &ScoreSeries,
    levels: &[Level],
    inflections: &[InflectionPoint],
    zones: &[ConsolidationZone],
    min_inflection_strength: f64,
) {
    println!("\n=== Fear & Greed Structural Recon: {target} ===\n");

    if let (Some(current), Some((_, trend))) = (series.values.last(), smoothed.last_defined()) {
        let sentiment = if *current > NEUTRAL_SCORE { "GREED" } else { "FEAR" };
        let direction = match slopes.last_defined() {
            Some((_, slope)) if slope > 0.0 => "RISING",
            Some((_, slope)) if slope < 0.0 => "FALLING",
            _ => "FLAT",
        };
        println!("Current Score: {current:.1} ({sentiment})");
        println!("Smoothed Trend: {trend:.1} ({direction})");
    }

    if levels.is_empty() {
        println!("\nNo support/resistance levels with enough touches.");
    } else {
        let rows: Vec<LevelRow> = levels
            .iter()
            .map(|level| LevelRow {
                kind: match level.kind {
                    LevelKind::Support => "Support",
                    LevelKind::Resistance => "Resistance",
                },
                level: format!("{:.0}", level.value),
                touches: level.touches,
            })
            .collect();
        println!("\nSupport / Resistance");
        print_table(rows);
    }

    let significant: Vec<&InflectionPoint> = inflections
        .iter()
        .filter(|p| p.strength > min_inflection_strength)
        .collect();
    if significant.is_empty() {
        println!("No inflections above strength {min_inflection_strength:.2}.");
    } else {
        let rows: Vec<InflectionRow> = significant
            .iter()
            .map(|point| InflectionRow {
                date: point.date.format("%Y-%m-%d").to_string(),
                kind: match point.kind {
                    InflectionKind::Bottom => "Bottom",
                    InflectionKind::Top => "Top",
                    InflectionKind::Neutral => "Neutral",
                },
                score: format!("{:.1}", point.value),
                strength: format!("{:.2}", point.strength),
            })
            .collect();
        println!("Trend Inflections (strength > {min_inflection_strength:.2})");
        print_table(rows);
    }

    if zones.is_empty() {
        println!("No consolidation zones detected.");
    } else {
        let rows: Vec<ZoneRow> = zones
            .iter()
            .map(|zone| ZoneRow {
                start: zone.start.format("%Y-%m-%d").to_string(),
                end: zone.end.format("%Y-%m-%d").to_string(),
                days: zone.days,
                level: format!("{:.1}", zone.level),
            })
            .collect();
        println!("Consolidation Zones");
        print_table(rows);
    }
}

fn print_table<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}\n");
}

/// Machine-readable counterpart of the terminal report.
#[derive(Serialize)]
pub struct AnalysisReport<'a> {
    pub target: &'a str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub scores: Vec<SeriesPoint>,
    pub smoothed: Vec<SeriesPoint>,
    pub slopes: Vec<SeriesPoint>,
    pub levels: &'a [Level],
    pub inflections: &'a [InflectionPoint],
    pub zones: &'a [ConsolidationZone],
}

pub fn write_json(path: &Path, report: &AnalysisReport) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("failed to write analysis JSON to {:?}", path))?;
    Ok(())
}
