//! Configuration module
//!
//! Handles CLI argument parsing, construction of the immutable workload
//! description, and its validation against the opened target file.
//!
//! A `WorkloadConfig` is built once per invocation through
//! `WorkloadConfigBuilder`, which checks everything that can be checked
//! without touching the filesystem. The rest (alignment, whole-file ranges,
//! direct IO truncation) is resolved by `validator::finalize` once the file
//! is open.

pub mod cli;
pub mod cli_convert;
pub mod validator;
pub mod workload;

use crate::error::{LoadError, LoadResult};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
pub use validator::FinalizedConfig;
pub use workload::{AccessPattern, ByteRange, Direction};

/// Validated description of one workload run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkloadConfig {
    direction: Direction,
    block_size: u64,
    block_count: u64,
    target_path: PathBuf,
    /// `None` means the whole file, resolved after open
    range: Option<ByteRange>,
    direct: bool,
    pattern: AccessPattern,
    seed: Option<u64>,
}

impl WorkloadConfig {
    pub fn builder() -> WorkloadConfigBuilder {
        WorkloadConfigBuilder::default()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn range(&self) -> Option<ByteRange> {
        self.range
    }

    pub fn direct(&self) -> bool {
        self.direct
    }

    pub fn pattern(&self) -> AccessPattern {
        self.pattern
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Total bytes the run asks for: `block_size * block_count`
    ///
    /// Cannot overflow, the builder rejects configs where it would.
    pub fn requested_bytes(&self) -> u64 {
        self.block_size * self.block_count
    }
}

impl fmt::Display for WorkloadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = match self.range {
            Some(r) => r.to_string(),
            None => "whole file".to_string(),
        };
        write!(
            f,
            "{} {}, {} x {} bytes on {} (range {}, {}, direct {})",
            self.pattern,
            self.direction,
            self.block_count,
            self.block_size,
            self.target_path.display(),
            range,
            match self.seed {
                Some(seed) => format!("seed {}", seed),
                None => "random seed".to_string(),
            },
            if self.direct { "on" } else { "off" },
        )
    }
}

/// Builder enforcing required fields and construction-time invariants
#[derive(Debug, Default, Clone)]
pub struct WorkloadConfigBuilder {
    direction: Option<Direction>,
    block_size: Option<u64>,
    block_count: Option<u64>,
    target_path: Option<PathBuf>,
    range: Option<ByteRange>,
    direct: Option<bool>,
    pattern: Option<AccessPattern>,
    seed: Option<u64>,
}

impl WorkloadConfigBuilder {
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn block_size(mut self, block_size: u64) -> Self {
        self.block_size = Some(block_size);
        self
    }

    pub fn block_count(mut self, block_count: u64) -> Self {
        self.block_count = Some(block_count);
        self
    }

    pub fn target_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_path = Some(path.into());
        self
    }

    pub fn range(mut self, range: ByteRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn direct(mut self, direct: bool) -> Self {
        self.direct = Some(direct);
        self
    }

    pub fn pattern(mut self, pattern: AccessPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and produce the immutable config
    ///
    /// # Errors
    ///
    /// - `Argument` if a required field was never set
    /// - `Config` if a size is zero, the range is inverted, the range cannot
    ///   hold `block_size * block_count` bytes, or the product overflows
    pub fn build(self) -> LoadResult<WorkloadConfig> {
        let direction = self.direction.ok_or_else(|| missing("rw"))?;
        let block_size = self.block_size.ok_or_else(|| missing("block_size"))?;
        let block_count = self.block_count.ok_or_else(|| missing("block_count"))?;
        let target_path = self.target_path.ok_or_else(|| missing("file"))?;

        if block_size == 0 {
            return Err(LoadError::config("block_size must be greater than 0"));
        }
        if block_count == 0 {
            return Err(LoadError::config("block_count must be greater than 0"));
        }
        if usize::try_from(block_size).is_err() {
            return Err(LoadError::config(format!(
                "block_size {} does not fit in memory on this platform",
                block_size
            )));
        }
        let requested = block_size.checked_mul(block_count).ok_or_else(|| {
            LoadError::config(format!(
                "block_size ({}) * block_count ({}) overflows",
                block_size, block_count
            ))
        })?;

        // 0-0 is the whole-file sentinel; anything else is checked now
        let range = match self.range {
            Some(r) if r.is_unset() => None,
            Some(r) => {
                if r.start > r.end {
                    return Err(LoadError::config(format!(
                        "start of range ({}) cannot be greater than end ({})",
                        r.start, r.end
                    )));
                }
                if r.len() < requested {
                    return Err(LoadError::config(format!(
                        "range {} ({} bytes) smaller than block_size * block_count ({} bytes)",
                        r,
                        r.len(),
                        requested
                    )));
                }
                Some(r)
            }
            None => None,
        };

        if self.direct.unwrap_or(false) && !cfg!(target_os = "linux") {
            return Err(LoadError::config("direct IO is only supported on Linux"));
        }

        Ok(WorkloadConfig {
            direction,
            block_size,
            block_count,
            target_path,
            range,
            direct: self.direct.unwrap_or(false),
            pattern: self.pattern.unwrap_or_default(),
            seed: self.seed,
        })
    }
}

fn missing(option: &str) -> LoadError {
    LoadError::argument(option, "required argument was not provided")
}
