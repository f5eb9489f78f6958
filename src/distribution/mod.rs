//! Offset generation
//!
//! This module turns an iteration index into the byte offset of that
//! iteration's block. Two access patterns are supported:
//!
//! - **Sequential**: block `i` of the range, deterministic and restartable
//! - **Random**: a uniform draw over every whole block slot of the range
//!
//! # Block-Based Design
//!
//! Both patterns produce block slot numbers (0, 1, 2, ..., N-1) rather than
//! byte offsets. The generator converts a slot to a byte offset with
//! `offset = range.start + slot * block_size`, so every offset is a whole
//! number of blocks from the range start. When direct IO is in use the
//! validator has already made `range.start` and `block_size` multiples of the
//! filesystem alignment, so every generated offset is aligned too.
//!
//! # Randomness
//!
//! A run owns exactly one generator, [`RunRng`]. It drives both the random
//! offsets and the write payload, so a run started with the same seed and
//! config replays the same offsets and the same bytes.
//!
//! # Example
//!
//! ```
//! use ioloader::config::{AccessPattern, ByteRange};
//! use ioloader::distribution::{rng_from_seed, OffsetGenerator};
//!
//! let generator = OffsetGenerator::new(AccessPattern::Sequential, ByteRange::new(0, 40960), 4096);
//! let mut rng = rng_from_seed(1);
//! assert_eq!(generator.offset_for(0, &mut rng).unwrap(), 0);
//! assert_eq!(generator.offset_for(9, &mut rng).unwrap(), 36864);
//! ```

pub mod sequential;
pub mod uniform;

use crate::config::{AccessPattern, ByteRange, FinalizedConfig};
use crate::error::{LoadError, LoadResult};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::{SystemTime, UNIX_EPOCH};

/// Pseudo-random generator owned by a single run
pub type RunRng = Xoshiro256PlusPlus;

/// Create the run generator from a seed
pub fn rng_from_seed(seed: u64) -> RunRng {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// Seed to use for a run
///
/// Returns the caller's seed when given, otherwise one derived from the
/// current time and the process id.
pub fn run_seed(requested: Option<u64>) -> u64 {
    requested.unwrap_or_else(|| {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        nanos ^ u64::from(std::process::id())
    })
}

/// Maps iteration indices to byte offsets for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetGenerator {
    pattern: AccessPattern,
    range: ByteRange,
    block_size: u64,
}

impl OffsetGenerator {
    pub fn new(pattern: AccessPattern, range: ByteRange, block_size: u64) -> Self {
        Self {
            pattern,
            range,
            block_size,
        }
    }

    pub fn for_config(config: &FinalizedConfig) -> Self {
        Self::new(config.pattern(), config.range(), config.block_size())
    }

    /// Number of whole blocks that fit in the range
    pub fn slot_count(&self) -> u64 {
        if self.block_size == 0 {
            return 0;
        }
        self.range.len() / self.block_size
    }

    /// Byte offset for iteration `index`
    ///
    /// Sequential offsets ignore `rng`; random offsets consume one draw.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the block size is zero or no whole block fits in the
    /// range, or a sequential index runs past the end of the range. Config
    /// validation makes all of these unreachable.
    #[inline]
    pub fn offset_for(&self, index: u64, rng: &mut RunRng) -> LoadResult<u64> {
        if self.block_size == 0 {
            return Err(LoadError::InvalidState("block_size is zero"));
        }
        let slots = self.slot_count();
        let slot = match self.pattern {
            AccessPattern::Sequential => sequential::slot_for(index, slots).ok_or(
                LoadError::InvalidState("sequential offset past the end of the range"),
            )?,
            AccessPattern::Random => {
                if slots == 0 {
                    return Err(LoadError::InvalidState("range holds no whole block"));
                }
                uniform::draw_slot(rng, slots)
            }
        };
        Ok(self.range.start + slot * self.block_size)
    }
}
