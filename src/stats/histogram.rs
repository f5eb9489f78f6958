//! Latency histogram using HdrHistogram
//!
//! Every operation of a run (seek plus transfer) is timed and recorded here.
//! HdrHistogram gives constant-time recording and percentile queries with
//! bounded memory, whatever the block count.
//!
//! # Example
//!
//! ```
//! use ioloader::stats::histogram::LatencyHistogram;
//! use std::time::Duration;
//!
//! let mut hist = LatencyHistogram::new()?;
//! hist.record(Duration::from_micros(100));
//! hist.record(Duration::from_micros(150));
//! hist.record(Duration::from_micros(200));
//!
//! let p50 = hist.percentile(50.0);
//! println!("p50: {:?}", p50);
//! # Ok::<(), ioloader::LoadError>(())
//! ```

use crate::error::{LoadError, LoadResult};
use hdrhistogram::Histogram;
use serde::Serialize;
use std::time::Duration;

/// Largest trackable latency: 1 hour in nanoseconds
const MAX_LATENCY_NS: u64 = 3_600_000_000_000;

/// Significant digits kept per value (0.1% precision)
const SIGFIG: u8 = 3;

/// Latency histogram wrapper
///
/// Tracks latencies from 1ns to 1 hour with 3 significant digits. Samples
/// outside that range are clamped.
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    histogram: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create an empty histogram
    pub fn new() -> LoadResult<Self> {
        let histogram = Histogram::new_with_bounds(1, MAX_LATENCY_NS, SIGFIG)
            .map_err(|_| LoadError::InvalidState("latency histogram bounds rejected"))?;
        Ok(Self { histogram })
    }

    /// Record a latency sample
    #[inline]
    pub fn record(&mut self, latency: Duration) {
        let nanos = u64::try_from(latency.as_nanos()).unwrap_or(MAX_LATENCY_NS);
        let value = nanos.clamp(1, MAX_LATENCY_NS);
        // In range after clamping, so this cannot fail
        let _ = self.histogram.record(value);
    }

    /// Get the latency at `percentile` (0.0 - 100.0), or None if empty
    pub fn percentile(&self, percentile: f64) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(
            self.histogram.value_at_percentile(percentile),
        ))
    }

    pub fn min(&self) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.min()))
    }

    pub fn max(&self) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.max()))
    }

    pub fn mean(&self) -> Option<Duration> {
        if self.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.mean() as u64))
    }

    /// Number of samples recorded
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }

    /// Condense the histogram into the figures a report prints
    pub fn summary(&self) -> Option<LatencySummary> {
        if self.is_empty() {
            return None;
        }
        let ns = |p: f64| self.histogram.value_at_percentile(p);
        Some(LatencySummary {
            samples: self.len(),
            min_ns: self.histogram.min(),
            mean_ns: self.histogram.mean() as u64,
            p50_ns: ns(50.0),
            p90_ns: ns(90.0),
            p99_ns: ns(99.0),
            p999_ns: ns(99.9),
            max_ns: self.histogram.max(),
        })
    }
}

/// Latency figures of a run, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatencySummary {
    pub samples: u64,
    pub min_ns: u64,
    pub mean_ns: u64,
    pub p50_ns: u64,
    pub p90_ns: u64,
    pub p99_ns: u64,
    pub p999_ns: u64,
    pub max_ns: u64,
}
