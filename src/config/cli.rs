//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Operation direction (`--rw`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RwMode {
    /// Write pseudo-random blocks, creating the file if needed
    Write,
    /// Read blocks, stopping early at end of file
    Read,
}

/// On/off switch (`--direct`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

/// Access pattern (`--type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatternType {
    /// Uniformly drawn block offsets
    Random,
    /// Consecutive block offsets from the range start
    Sequence,
}

/// ioloader - block IO workload generator
#[derive(Parser, Debug)]
#[command(name = "ioloader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Operation direction: write or read
    #[arg(long, value_enum, ignore_case = true)]
    pub rw: RwMode,

    /// Bytes per operation (e.g., 4096, 4k, 1M)
    #[arg(long = "block_size")]
    pub block_size: String,

    /// Number of operations to perform
    #[arg(long = "block_count")]
    pub block_count: String,

    /// Target file (created for write runs if absent)
    #[arg(long)]
    pub file: PathBuf,

    /// Byte range as start-end; omitted or 0-0 means the whole file
    #[arg(long)]
    pub range: Option<String>,

    /// Bypass the page cache (O_DIRECT): on or off
    #[arg(long, value_enum, ignore_case = true)]
    pub direct: Switch,

    /// Access pattern: random or sequence
    #[arg(long = "type", value_enum, ignore_case = true)]
    pub pattern: PatternType,

    /// Seed for reproducible random offsets and write data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write the run report as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Validate and print the configuration without performing IO
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = vec!["ioloader"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
    }

    const REQUIRED: &[&str] = &[
        "--rw", "write",
        "--block_size", "4096",
        "--block_count", "10",
        "--file", "/tmp/data.bin",
        "--direct", "off",
        "--type", "sequence",
    ];

    #[test]
    fn test_parse_required_options() {
        let cli = parse(REQUIRED).unwrap();
        assert_eq!(cli.rw, RwMode::Write);
        assert_eq!(cli.block_size, "4096");
        assert_eq!(cli.block_count, "10");
        assert_eq!(cli.file, PathBuf::from("/tmp/data.bin"));
        assert_eq!(cli.direct, Switch::Off);
        assert_eq!(cli.pattern, PatternType::Sequence);
        assert!(cli.range.is_none());
        assert!(cli.seed.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_equals_syntax_and_range() {
        let cli = parse(&[
            "--rw=read",
            "--block_size=4k",
            "--block_count=2",
            "--file=/tmp/x",
            "--range=0-40960",
            "--direct=on",
            "--type=random",
        ])
        .unwrap();
        assert_eq!(cli.rw, RwMode::Read);
        assert_eq!(cli.range.as_deref(), Some("0-40960"));
        assert_eq!(cli.direct, Switch::On);
        assert_eq!(cli.pattern, PatternType::Random);
    }

    #[test]
    fn test_values_are_case_insensitive() {
        let cli = parse(&[
            "--rw", "WRITE",
            "--block_size", "512",
            "--block_count", "1",
            "--file", "/tmp/x",
            "--direct", "Off",
            "--type", "Random",
        ])
        .unwrap();
        assert_eq!(cli.rw, RwMode::Write);
        assert_eq!(cli.direct, Switch::Off);
        assert_eq!(cli.pattern, PatternType::Random);
    }

    #[test]
    fn test_missing_required_option_fails() {
        // Drop --type
        let args: Vec<&str> = REQUIRED[..REQUIRED.len() - 2].to_vec();
        assert!(parse(&args).is_err());
    }

    #[test]
    fn test_unknown_value_fails() {
        let mut args = REQUIRED.to_vec();
        args[1] = "append";
        assert!(parse(&args).is_err());
    }

    #[test]
    fn test_unknown_option_fails() {
        let mut args = REQUIRED.to_vec();
        args.push("--threads");
        args.push("4");
        assert!(parse(&args).is_err());
    }

    #[test]
    fn test_optional_extras() {
        let mut args = REQUIRED.to_vec();
        args.extend_from_slice(&["--seed", "42", "--json", "/tmp/report.json", "--dry-run", "--debug"]);
        let cli = parse(&args).unwrap();
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.json, Some(PathBuf::from("/tmp/report.json")));
        assert!(cli.dry_run);
        assert!(cli.debug);
    }
}
