//! Statistics collection
//!
//! A run is a single thread issuing one operation at a time, so the counters
//! are plain integers owned by the run loop. Per-operation latency goes into
//! an HdrHistogram ([`histogram::LatencyHistogram`]).
//!
//! # Example
//!
//! ```
//! use ioloader::stats::RunStats;
//! use std::time::Duration;
//!
//! let mut stats = RunStats::new()?;
//! stats.record_io(4096, 4096, Duration::from_micros(100));
//! stats.record_io(1024, 4096, Duration::from_micros(80));
//!
//! assert_eq!(stats.ops(), 2);
//! assert_eq!(stats.bytes(), 5120);
//! assert_eq!(stats.partial_ops(), 1);
//! # Ok::<(), ioloader::LoadError>(())
//! ```

pub mod histogram;

use crate::error::LoadResult;
use histogram::LatencyHistogram;
use std::time::Duration;

/// Counters for one run
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Operations that transferred at least one byte
    ops: u64,

    /// Total bytes transferred
    bytes: u64,

    /// Operations that transferred less than a full block
    partial_ops: u64,

    latency: LatencyHistogram,
}

impl RunStats {
    pub fn new() -> LoadResult<Self> {
        Ok(Self {
            ops: 0,
            bytes: 0,
            partial_ops: 0,
            latency: LatencyHistogram::new()?,
        })
    }

    /// Record one performed operation
    ///
    /// `transferred` is what the syscall returned, `block_size` what was asked.
    #[inline]
    pub fn record_io(&mut self, transferred: usize, block_size: usize, latency: Duration) {
        self.ops += 1;
        self.bytes += transferred as u64;
        if transferred < block_size {
            self.partial_ops += 1;
        }
        self.latency.record(latency);
    }

    pub fn ops(&self) -> u64 {
        self.ops
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn partial_ops(&self) -> u64 {
        self.partial_ops
    }

    pub fn latency(&self) -> &LatencyHistogram {
        &self.latency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_empty() {
        let stats = RunStats::new().unwrap();
        assert_eq!(stats.ops(), 0);
        assert_eq!(stats.bytes(), 0);
        assert_eq!(stats.partial_ops(), 0);
        assert!(stats.latency().is_empty());
    }

    #[test]
    fn test_record_full_blocks() {
        let mut stats = RunStats::new().unwrap();
        for _ in 0..10 {
            stats.record_io(4096, 4096, Duration::from_micros(50));
        }
        assert_eq!(stats.ops(), 10);
        assert_eq!(stats.bytes(), 40960);
        assert_eq!(stats.partial_ops(), 0);
        assert_eq!(stats.latency().len(), 10);
    }

    #[test]
    fn test_record_partial_block() {
        let mut stats = RunStats::new().unwrap();
        stats.record_io(100, 4096, Duration::from_micros(5));
        assert_eq!(stats.ops(), 1);
        assert_eq!(stats.bytes(), 100);
        assert_eq!(stats.partial_ops(), 1);
    }
}
