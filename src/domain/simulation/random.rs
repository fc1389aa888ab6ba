//! Seeded random streams.
//!
//! Every stream is derived from one master seed and a stable stream index, so
//! a parallel run reproduces the same scores regardless of how chunks are
//! scheduled across threads.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STREAM_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Generator for stream `index` under `master_seed`.
pub fn stream_rng(master_seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(master_seed ^ index.wrapping_mul(STREAM_SPREAD))
}

/// Master seed for a run that was not given one, so the run can be replayed.
pub fn fresh_seed() -> u64 {
    rand::rng().random()
}
