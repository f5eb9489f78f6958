//! CLI to WorkloadConfig conversion utilities

use crate::config::cli::{self, Cli};
use crate::config::{AccessPattern, ByteRange, Direction, WorkloadConfig};
use crate::error::{LoadError, LoadResult};

/// Binary unit suffixes accepted by [`parse_size`]
const UNITS: [(char, u64); 4] = [('k', 1 << 10), ('m', 1 << 20), ('g', 1 << 30), ('t', 1 << 40)];

/// Parse a size string (e.g., "4096", "4k", "1M") to bytes
///
/// Accepts a plain decimal integer optionally followed by a binary unit
/// suffix (`k`, `m`, `g`, `t`, each optionally followed by `b`).
pub fn parse_size(option: &str, s: &str) -> LoadResult<u64> {
    let s = s.trim().to_lowercase();

    let body = s.strip_suffix('b').unwrap_or(s.as_str());
    let (num_str, multiplier) = UNITS
        .iter()
        .find_map(|&(unit, multiplier)| body.strip_suffix(unit).map(|n| (n, multiplier)))
        .unwrap_or((s.as_str(), 1));

    let num = parse_decimal(option, num_str, &s)?;
    num.checked_mul(multiplier)
        .ok_or_else(|| LoadError::argument(option, format!("size `{}` is too large", s)))
}

/// Parse an operation count (plain decimal integer)
pub fn parse_count(option: &str, s: &str) -> LoadResult<u64> {
    let s = s.trim();
    parse_decimal(option, s, s)
}

/// Parse a `start-end` byte range
///
/// Both bounds accept the same syntax as [`parse_size`]. The ordering of the
/// bounds is checked when the config is built, not here.
pub fn parse_range(s: &str) -> LoadResult<ByteRange> {
    let (start, end) = s
        .trim()
        .split_once('-')
        .ok_or_else(|| LoadError::argument("range", format!("`{}` is not in start-end format", s)))?;

    let start = parse_size("range", start)
        .map_err(|_| LoadError::argument("range", format!("incorrect start of range in `{}`", s)))?;
    let end = parse_size("range", end)
        .map_err(|_| LoadError::argument("range", format!("incorrect end of range in `{}`", s)))?;

    Ok(ByteRange::new(start, end))
}

fn parse_decimal(option: &str, digits: &str, original: &str) -> LoadResult<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LoadError::argument(
            option,
            format!("`{}` is not a non-negative integer", original),
        ));
    }
    digits
        .parse::<u64>()
        .map_err(|e| LoadError::argument(option, format!("`{}`: {}", original, e)))
}

/// Convert CLI RwMode to workload Direction
pub fn convert_direction(mode: cli::RwMode) -> Direction {
    match mode {
        cli::RwMode::Write => Direction::Write,
        cli::RwMode::Read => Direction::Read,
    }
}

/// Convert CLI PatternType to workload AccessPattern
pub fn convert_pattern(pattern: cli::PatternType) -> AccessPattern {
    match pattern {
        cli::PatternType::Random => AccessPattern::Random,
        cli::PatternType::Sequence => AccessPattern::Sequential,
    }
}

/// Build the workload configuration from parsed CLI arguments
pub fn build_workload(cli: &Cli) -> LoadResult<WorkloadConfig> {
    let mut builder = WorkloadConfig::builder()
        .direction(convert_direction(cli.rw))
        .block_size(parse_size("block_size", &cli.block_size)?)
        .block_count(parse_count("block_count", &cli.block_count)?)
        .target_path(cli.file.clone())
        .direct(cli.direct == cli::Switch::On)
        .pattern(convert_pattern(cli.pattern));

    if let Some(ref range) = cli.range {
        builder = builder.range(parse_range(range)?);
    }
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_size_bytes() {
        assert_eq!(parse_size("block_size", "1024").unwrap(), 1024);
        assert_eq!(parse_size("block_size", "512").unwrap(), 512);
    }

    #[test]
    fn test_parse_size_suffixes() {
        assert_eq!(parse_size("block_size", "4k").unwrap(), 4096);
        assert_eq!(parse_size("block_size", "4KB").unwrap(), 4096);
        assert_eq!(parse_size("block_size", "1m").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("block_size", "2G").unwrap(), 2 * 1024 * 1024 * 1024);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size("block_size", "").is_err());
        assert!(parse_size("block_size", "abc").is_err());
        assert!(parse_size("block_size", "12x").is_err());
        assert!(parse_size("block_size", "-4096").is_err());
        assert!(parse_size("block_size", "+4096").is_err());
        assert!(parse_size("block_size", "k").is_err());
        assert!(parse_size("block_size", "4kk").is_err());
        assert!(parse_size("block_size", "4b").is_err());
    }

    #[test]
    fn test_parse_size_overflow() {
        assert!(parse_size("block_size", "99999999999999999999").is_err());
        assert!(parse_size("block_size", "18014398509481984t").is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("block_count", "10").unwrap(), 10);
        assert!(parse_count("block_count", "10k").is_err());
        assert!(parse_count("block_count", "ten").is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("0-40960").unwrap(), ByteRange::new(0, 40960));
        assert_eq!(parse_range("4k-1m").unwrap(), ByteRange::new(4096, 1024 * 1024));
        assert_eq!(parse_range("0-0").unwrap(), ByteRange::new(0, 0));
    }

    #[test]
    fn test_parse_range_rejects_malformed() {
        for bad in ["40960", "-40960", "0-", "a-10", "0-10x", "0-10-20"] {
            match parse_range(bad) {
                Err(LoadError::Argument { option, .. }) => assert_eq!(option, "range"),
                other => panic!("{} parsed unexpectedly: {:?}", bad, other),
            }
        }
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec![
            "ioloader",
            "--rw", "write",
            "--block_size", "4096",
            "--block_count", "10",
            "--file", "/tmp/convert.dat",
            "--direct", "off",
            "--type", "sequence",
        ];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_build_workload() {
        let config = build_workload(&cli(&["--range", "0-40960", "--seed", "9"])).unwrap();
        assert_eq!(config.direction(), Direction::Write);
        assert_eq!(config.block_size(), 4096);
        assert_eq!(config.block_count(), 10);
        assert_eq!(config.range(), Some(ByteRange::new(0, 40960)));
        assert_eq!(config.pattern(), AccessPattern::Sequential);
        assert_eq!(config.seed(), Some(9));
        assert!(!config.direct());
    }

    #[test]
    fn test_build_workload_inverted_range_is_config_error() {
        let err = build_workload(&cli(&["--range", "40960-0"])).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn test_build_workload_bad_size_is_argument_error() {
        let mut parsed = cli(&[]);
        parsed.block_size = "lots".to_string();
        let err = build_workload(&parsed).unwrap_err();
        assert!(matches!(err, LoadError::Argument { .. }));
    }
}
