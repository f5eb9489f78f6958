//! Error types for a workload run
//!
//! Every failure a run can hit maps to one `LoadError` variant. None of them is
//! retried: the tool measures raw IO behaviour, so the first failure ends the run.
//! Reaching end-of-file during a read run is not an error and never shows up here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single workload run
#[derive(Debug, Error)]
pub enum LoadError {
    /// Malformed command-line input (non-numeric size, bad range syntax, unknown value)
    #[error("invalid argument `{option}`: {reason}")]
    Argument { option: String, reason: String },

    /// A workload invariant does not hold (sizes, range, alignment)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The target file could not be opened or created
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The block buffer could not be allocated
    #[error("failed to allocate {size} byte buffer (alignment {alignment})")]
    Allocation { size: usize, alignment: usize },

    /// Repositioning the file offset failed
    #[error("seek to offset {offset} failed: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The kernel accepted fewer bytes than one block
    #[error("short write at offset {offset}: wrote {written} of {expected} bytes")]
    ShortWrite {
        offset: u64,
        written: usize,
        expected: usize,
    },

    /// The write syscall itself failed
    #[error("write at offset {offset} failed: {source}")]
    Write {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The read syscall failed
    #[error("read at offset {offset} failed: {source}")]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// Internal state that config validation should have made unreachable
    #[error("invalid internal state: {0}")]
    InvalidState(&'static str),
}

impl LoadError {
    pub(crate) fn argument(option: &str, reason: impl Into<String>) -> Self {
        LoadError::Argument {
            option: option.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        LoadError::Config(reason.into())
    }
}

/// Result alias for workload operations
pub type LoadResult<T> = std::result::Result<T, LoadError>;
