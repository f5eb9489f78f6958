//! ioloader - block IO workload generator
//!
//! ioloader issues a fixed number of fixed-size reads or writes against one
//! file, at sequential or uniformly random block offsets within a byte range,
//! optionally bypassing the page cache with direct IO, and reports what it did.
//!
//! # Architecture
//!
//! - **config**: command line, workload builder, validation against the file
//! - **distribution**: block offsets for sequential and random patterns
//! - **target / engine**: opening the file and the blocking IO primitives
//! - **worker**: the run itself, one operation at a time
//! - **stats / output**: counters, latency histogram, text and JSON reports

pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod output;
pub mod stats;
pub mod target;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::WorkloadConfig;
pub use engine::IOEngine;
pub use error::{LoadError, LoadResult};
pub use worker::{RunOutcome, RunReport, Worker};

/// Result type used at the application boundary
pub type Result<T> = anyhow::Result<T>;
