//! Run execution
//!
//! This module implements the Worker, which executes one workload run from
//! start to finish on the calling thread.
//!
//! # Phases
//!
//! A run moves through `Opening -> Validating -> Looping -> Closing`:
//!
//! - **Opening**: open (or create) the target with flags derived from the
//!   workload. Nothing else has been acquired yet.
//! - **Validating**: stat the open file and finalize the workload against it
//!   (alignment, resolved range). A failure here closes the file.
//! - **Looping**: one seek plus one transfer per iteration, in index order.
//! - **Closing**: the buffer and the file are released, whichever way the
//!   loop ended.
//!
//! Release is ownership-based: the buffer and the engine (which owns the file)
//! are dropped on every return path, including `?`.
//!
//! # Example
//!
//! ```no_run
//! use ioloader::config::{Direction, WorkloadConfig};
//! use ioloader::worker::Worker;
//!
//! let workload = WorkloadConfig::builder()
//!     .direction(Direction::Write)
//!     .block_size(4096)
//!     .block_count(10)
//!     .target_path("/tmp/testfile")
//!     .build()?;
//!
//! let report = Worker::new(workload).run()?;
//! println!("Completed {} operations", report.performed());
//! # Ok::<(), ioloader::LoadError>(())
//! ```

use crate::config::{validator, Direction, FinalizedConfig, WorkloadConfig};
use crate::distribution::{rng_from_seed, run_seed, OffsetGenerator, RunRng};
use crate::engine::sync::SyncEngine;
use crate::engine::IOEngine;
use crate::error::{LoadError, LoadResult};
use crate::stats::RunStats;
use crate::target::{OpenFlags, TargetFile};
use crate::util::buffer::IoBuffer;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Phase of a run, used in debug logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Opening,
    Validating,
    Looping,
    Closing,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Opening => "opening",
            RunPhase::Validating => "validating",
            RunPhase::Looping => "looping",
            RunPhase::Closing => "closing",
        };
        f.write_str(name)
    }
}

/// How a successful run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every requested iteration was performed
    Completed,
    /// A read reached end of file before the last iteration
    StoppedAtEof,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Completed => f.write_str("completed"),
            RunOutcome::StoppedAtEof => f.write_str("stopped at end of file"),
        }
    }
}

/// Result of the IO loop alone
#[derive(Debug, Clone)]
pub struct LoopResult {
    pub outcome: RunOutcome,
    pub stats: RunStats,
    /// Wall time of the loop
    pub elapsed: Duration,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub config: FinalizedConfig,
    pub seed: u64,
    pub outcome: RunOutcome,
    pub stats: RunStats,
    pub elapsed: Duration,
}

impl RunReport {
    /// Iterations asked for (`block_count`)
    pub fn requested(&self) -> u64 {
        self.config.block_count()
    }

    /// Iterations that transferred data
    pub fn performed(&self) -> u64 {
        self.stats.ops()
    }

    pub fn bytes(&self) -> u64 {
        self.stats.bytes()
    }
}

/// Executes one workload run
#[derive(Debug, Clone)]
pub struct Worker {
    workload: WorkloadConfig,
    seed: u64,
}

impl Worker {
    /// Prepare a run; the seed is fixed here so it can be reported up front
    pub fn new(workload: WorkloadConfig) -> Self {
        let seed = run_seed(workload.seed());
        Self { workload, seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn workload(&self) -> &WorkloadConfig {
        &self.workload
    }

    /// Run the workload against the real target file
    pub fn run(&self) -> LoadResult<RunReport> {
        info!(seed = self.seed, "using seed");

        debug!(phase = %RunPhase::Opening, path = %self.workload.target_path().display(), "entering phase");
        let flags = OpenFlags::for_run(self.workload.direction(), self.workload.direct());
        let target = TargetFile::open(self.workload.target_path(), flags)?;

        debug!(phase = %RunPhase::Validating, "entering phase");
        let config = validator::finalize(&self.workload, target.facts()?)?;
        info!(
            range = %config.range(),
            alignment = config.alignment(),
            "workload finalized"
        );

        let block_size = usize::try_from(config.block_size())
            .map_err(|_| LoadError::InvalidState("block size exceeds address space"))?;
        let alignment = if config.direct() {
            let alignment = usize::try_from(config.alignment())
                .map_err(|_| LoadError::InvalidState("alignment exceeds address space"))?;
            Some(alignment)
        } else {
            None
        };
        let mut buffer = IoBuffer::allocate(block_size, alignment)?;
        let mut engine = SyncEngine::new(target.into_file());
        let mut rng = rng_from_seed(self.seed);

        debug!(phase = %RunPhase::Looping, "entering phase");
        let result = drive(&mut engine, &config, &mut buffer, &mut rng);

        debug!(phase = %RunPhase::Closing, "entering phase");
        drop(buffer);
        drop(engine);

        let result = result?;
        Ok(RunReport {
            config,
            seed: self.seed,
            outcome: result.outcome,
            stats: result.stats,
            elapsed: result.elapsed,
        })
    }
}

/// What one iteration did
enum Step {
    Transferred,
    EndOfFile,
}

/// Run the IO loop of a finalized workload on `engine`
///
/// Iterations run strictly in index order. The first fatal error ends the
/// loop; a read returning 0 bytes ends it early with `StoppedAtEof`.
pub fn drive<E: IOEngine>(
    engine: &mut E,
    config: &FinalizedConfig,
    buffer: &mut IoBuffer,
    rng: &mut RunRng,
) -> LoadResult<LoopResult> {
    if buffer.size() as u64 != config.block_size() {
        return Err(LoadError::InvalidState("buffer size differs from block size"));
    }

    let generator = OffsetGenerator::for_config(config);
    let mut stats = RunStats::new()?;
    let mut outcome = RunOutcome::Completed;
    let start = Instant::now();

    for index in 0..config.block_count() {
        match step(engine, config.direction(), &generator, index, buffer, rng, &mut stats) {
            Ok(Step::Transferred) => {}
            Ok(Step::EndOfFile) => {
                info!(
                    iteration = index,
                    performed = stats.ops(),
                    requested = config.block_count(),
                    "end of file reached, stopping early"
                );
                outcome = RunOutcome::StoppedAtEof;
                break;
            }
            Err(e) => {
                error!(iteration = index, performed = stats.ops(), error = %e, "run failed");
                return Err(e);
            }
        }
    }

    Ok(LoopResult {
        outcome,
        stats,
        elapsed: start.elapsed(),
    })
}

/// One iteration: offset, seek, transfer
///
/// Latency covers the seek and the transfer, not the payload fill.
fn step<E: IOEngine>(
    engine: &mut E,
    direction: Direction,
    generator: &OffsetGenerator,
    index: u64,
    buffer: &mut IoBuffer,
    rng: &mut RunRng,
    stats: &mut RunStats,
) -> LoadResult<Step> {
    let offset = generator.offset_for(index, rng)?;
    let block_size = buffer.size();

    let seek_start = Instant::now();
    engine
        .seek(offset)
        .map_err(|source| LoadError::Seek { offset, source })?;
    let seek_time = seek_start.elapsed();

    match direction {
        Direction::Write => {
            buffer.fill_nonzero(rng);
            let io_start = Instant::now();
            let written = engine
                .write(buffer.as_slice())
                .map_err(|source| LoadError::Write { offset, source })?;
            let latency = seek_time + io_start.elapsed();

            if written != block_size {
                return Err(LoadError::ShortWrite {
                    offset,
                    written,
                    expected: block_size,
                });
            }
            stats.record_io(written, block_size, latency);
            Ok(Step::Transferred)
        }
        Direction::Read => {
            let io_start = Instant::now();
            let read = engine
                .read(buffer.as_mut_slice())
                .map_err(|source| LoadError::Read { offset, source })?;
            let latency = seek_time + io_start.elapsed();

            if read == 0 {
                return Ok(Step::EndOfFile);
            }
            stats.record_io(read, block_size, latency);
            Ok(Step::Transferred)
        }
    }
}
