//! Uniform random block selection
//!
//! Every block slot of the range has equal probability on every draw. Draws
//! are independent, so one run may hit the same block several times and may
//! never touch others; there is no coverage guarantee.
//!
//! # Performance
//!
//! Uses the xoshiro256++ PRNG which is very fast and has good statistical
//! properties. This matters since a slot is drawn for every random-pattern IO.

use super::RunRng;
use rand::Rng;

/// Draw a slot in `[0, num_slots)`
///
/// `num_slots` must be non-zero.
#[inline(always)]
pub fn draw_slot(rng: &mut RunRng, num_slots: u64) -> u64 {
    rng.gen_range(0..num_slots)
}
