//! JSON output formatting
//!
//! Serializes a [`RunReport`] for machine consumption. Durations carry both an
//! exact integer and a human-readable string, and the document is stamped
//! with the RFC 3339 time it was produced.

use crate::config::FinalizedConfig;
use crate::stats::histogram::LatencySummary;
use crate::util::units::{format_duration, format_throughput, per_second};
use crate::worker::{RunOutcome, RunReport};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: u64::try_from(d.as_micros()).unwrap_or(u64::MAX),
            human: format_duration(d),
        }
    }
}

/// Throughput with bytes/sec and human-readable format
#[derive(Debug, Clone, Serialize)]
pub struct JsonThroughput {
    pub bytes_per_sec: u64,
    pub human: String,
}

impl JsonThroughput {
    pub fn new(bytes_per_sec: f64) -> Self {
        Self {
            bytes_per_sec: bytes_per_sec as u64,
            human: format_throughput(bytes_per_sec),
        }
    }
}

/// Complete JSON document for one run
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub tool: &'static str,
    pub version: &'static str,
    /// RFC 3339 time the report was produced
    pub timestamp: String,
    pub config: FinalizedConfig,
    pub seed: u64,
    pub outcome: RunOutcome,
    pub requested: u64,
    pub performed: u64,
    pub partial: u64,
    pub bytes: u64,
    pub elapsed: JsonDuration,
    pub iops: f64,
    pub throughput: JsonThroughput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<LatencySummary>,
}

impl JsonReport {
    pub fn from_report(report: &RunReport) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now().to_rfc3339(),
            config: report.config.clone(),
            seed: report.seed,
            outcome: report.outcome,
            requested: report.requested(),
            performed: report.performed(),
            partial: report.stats.partial_ops(),
            bytes: report.bytes(),
            elapsed: JsonDuration::from_duration(report.elapsed),
            iops: per_second(report.performed(), report.elapsed),
            throughput: JsonThroughput::new(per_second(report.bytes(), report.elapsed)),
            latency: report.stats.latency().summary(),
        }
    }
}

/// Write the report for `report` to `output_path` as pretty-printed JSON
pub fn write_json_output(output_path: &Path, report: &RunReport) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output {}", output_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &JsonReport::from_report(report))
        .with_context(|| format!("Failed to write JSON output {}", output_path.display()))?;
    Ok(())
}
