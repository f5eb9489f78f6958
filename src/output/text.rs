//! Human-readable text output

use crate::config::WorkloadConfig;
use crate::util::units::{format_bytes, format_duration, format_number, format_rate, format_throughput, per_second};
use crate::worker::{RunOutcome, RunReport};
use std::fmt;

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Print the workload as it will be run
pub fn print_configuration(workload: &WorkloadConfig, seed: u64) {
    print!("{}", ConfigurationBlock { workload, seed });
}

/// Print run results to stdout
pub fn print_results(report: &RunReport) {
    print!("{}", ResultsBlock(report));
}

pub fn format_configuration(workload: &WorkloadConfig, seed: u64) -> String {
    ConfigurationBlock { workload, seed }.to_string()
}

/// Render the results block
///
/// Shows operations, bytes, IOPS, throughput and latency percentiles.
pub fn format_results(report: &RunReport) -> String {
    ResultsBlock(report).to_string()
}

struct ConfigurationBlock<'a> {
    workload: &'a WorkloadConfig,
    seed: u64,
}

impl fmt::Display for ConfigurationBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let workload = self.workload;
        let range = workload
            .range()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "whole file".to_string());

        writeln!(f, "Configuration:")?;
        writeln!(f, "  Target:      {}", workload.target_path().display())?;
        writeln!(f, "  Direction:   {}", workload.direction())?;
        writeln!(f, "  Pattern:     {}", workload.pattern())?;
        writeln!(
            f,
            "  Block size:  {} ({})",
            format_number(workload.block_size()),
            format_bytes(workload.block_size())
        )?;
        writeln!(f, "  Block count: {}", format_number(workload.block_count()))?;
        writeln!(f, "  Range:       {}", range)?;
        writeln!(f, "  Direct IO:   {}", if workload.direct() { "on" } else { "off" })?;
        writeln!(f, "  Seed:        {}", self.seed)
    }
}

struct ResultsBlock<'a>(&'a RunReport);

impl fmt::Display for ResultsBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let elapsed = report.elapsed;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "                    TEST RESULTS")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;

        let outcome = match report.outcome {
            RunOutcome::Completed => "completed".to_string(),
            RunOutcome::StoppedAtEof => format!(
                "stopped at end of file after {} of {} operations",
                format_number(report.performed()),
                format_number(report.requested())
            ),
        };
        writeln!(f, "Outcome:      {}", outcome)?;
        writeln!(f, "Elapsed Time: {:.3}s", elapsed.as_secs_f64())?;
        writeln!(f, "Range:        {}", report.config.range())?;
        writeln!(f, "Alignment:    {}", report.config.alignment())?;
        writeln!(f, "Seed:         {}", report.seed)?;
        writeln!(f)?;

        writeln!(f, "Operations:")?;
        writeln!(
            f,
            "  {}: {} ops ({}) - {} IOPS",
            report.config.direction(),
            format_number(report.performed()),
            format_bytes(report.bytes()),
            format_rate(per_second(report.performed(), elapsed))
        )?;
        if report.stats.partial_ops() > 0 {
            writeln!(f, "  Partial: {}", format_number(report.stats.partial_ops()))?;
        }
        writeln!(f)?;

        writeln!(f, "Throughput:")?;
        writeln!(f, "  {}", format_throughput(per_second(report.bytes(), elapsed)))?;
        writeln!(f)?;

        writeln!(f, "Latency:")?;
        let hist = report.stats.latency();
        match (hist.min(), hist.mean(), hist.max()) {
            (Some(min), Some(mean), Some(max)) => {
                writeln!(f, "  Min:    {}", format_duration(min))?;
                writeln!(f, "  Mean:   {}", format_duration(mean))?;
                writeln!(f, "  Max:    {}", format_duration(max))?;
                writeln!(f)?;
                writeln!(f, "  Percentiles:")?;
                for &p in &[50.0, 90.0, 99.0, 99.9] {
                    if let Some(value) = hist.percentile(p) {
                        writeln!(f, "    p{:<5}: {}", p, format_duration(value))?;
                    }
                }
            }
            _ => writeln!(f, "  (no operations)")?,
        }
        writeln!(f, "{}", RULE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validator::{finalize, FileFacts};
    use crate::config::{ByteRange, Direction};
    use crate::stats::RunStats;
    use std::time::Duration;

    fn report(outcome: RunOutcome, ops: u64) -> RunReport {
        let workload = WorkloadConfig::builder()
            .direction(Direction::Read)
            .block_size(4096)
            .block_count(10)
            .target_path("/tmp/text.dat")
            .range(ByteRange::new(0, 40960))
            .build()
            .unwrap();
        let config = finalize(&workload, FileFacts { blksize: 4096, size: 40960 }).unwrap();

        let mut stats = RunStats::new().unwrap();
        for _ in 0..ops {
            stats.record_io(4096, 4096, Duration::from_micros(100));
        }
        RunReport {
            config,
            seed: 99,
            outcome,
            stats,
            elapsed: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_results_block() {
        let text = format_results(&report(RunOutcome::Completed, 10));
        assert!(text.contains("TEST RESULTS"));
        assert!(text.contains("Outcome:      completed"));
        assert!(text.contains("Range:        0-40960"));
        assert!(text.contains("Seed:         99"));
        assert!(text.contains("read: 10 ops"));
        assert!(text.contains("p50"));
        assert!(text.contains("p99.9"));
    }

    #[test]
    fn test_results_block_is_framed() {
        let text = format_results(&report(RunOutcome::Completed, 2));
        assert!(text.starts_with(RULE));
        assert!(text.ends_with(&format!("{}\n", RULE)));
    }

    #[test]
    fn test_results_early_eof() {
        let text = format_results(&report(RunOutcome::StoppedAtEof, 3));
        assert!(text.contains("stopped at end of file after 3 of 10 operations"));
    }

    #[test]
    fn test_results_without_operations() {
        let text = format_results(&report(RunOutcome::StoppedAtEof, 0));
        assert!(text.contains("(no operations)"));
    }

    #[test]
    fn test_configuration_block() {
        let workload = WorkloadConfig::builder()
            .direction(Direction::Write)
            .block_size(4096)
            .block_count(10)
            .target_path("/tmp/cfg.dat")
            .build()
            .unwrap();
        let text = format_configuration(&workload, 5);
        assert!(text.contains("Target:      /tmp/cfg.dat"));
        assert!(text.contains("Direction:   write"));
        assert!(text.contains("Range:       whole file"));
        assert!(text.contains("Direct IO:   off"));
        assert!(text.contains("Seed:        5"));
    }
}
