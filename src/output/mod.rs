mod csv;
mod json;
mod text;

use chrono::Utc;
use rolling_stats::Stats;
use serde::Serialize;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

use crate::signal_processing::Measurement;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One measured event with index columns scaled to the export axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventRow {
    pub index: usize,
    pub rise: f64,
    pub fall: f64,
    pub avg_freq: f64,
    pub max_freq: f64,
    pub slope_band: f64,
    pub half_left: f64,
    pub half_right: f64,
    pub half_band: f64,
}

impl EventRow {
    pub fn from_measurement(index: usize, m: &Measurement, scale: f64) -> Self {
        Self {
            index,
            rise: m.rise as f64 * scale,
            fall: m.fall as f64 * scale,
            avg_freq: m.avg_freq as f64 * scale,
            max_freq: m.max_freq as f64 * scale,
            slope_band: m.dev_band as f64 * scale,
            half_left: m.half_left as f64 * scale,
            half_right: m.half_right as f64 * scale,
            half_band: m.half_band as f64 * scale,
        }
    }
}

pub fn event_rows(measurements: &[Measurement], scale: f64) -> Vec<EventRow> {
    measurements
        .iter()
        .enumerate()
        .map(|(i, m)| EventRow::from_measurement(i, m, scale))
        .collect()
}

pub trait Formatter {
    fn format(&self, row: &EventRow) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool, unit: &'static str) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose, unit)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter::new(verbose)),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl StatsSummary {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut stats: Stats<f64> = Stats::new();
        for v in values {
            stats.update(v);
        }
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

/// Bandwidth statistics over all events of a run
#[derive(Debug, Clone, Serialize)]
pub struct BandwidthSummary {
    pub slope_band: StatsSummary,
    pub half_band: StatsSummary,
}

impl BandwidthSummary {
    pub fn from_rows(rows: &[EventRow]) -> Option<Self> {
        Some(Self {
            slope_band: StatsSummary::from_values(rows.iter().map(|r| r.slope_band))?,
            half_band: StatsSummary::from_values(rows.iter().map(|r| r.half_band))?,
        })
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
