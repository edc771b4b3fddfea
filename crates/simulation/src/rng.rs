//! Per-trial seed derivation.
//!
//! Every trial gets its own generator, seeded from the batch seed and the
//! trial index, so results do not depend on which thread ran which trial.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// SplitMix64 finaliser.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Derives an independent seed for `stream` from a parent seed.
#[must_use]
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    mix(seed ^ mix(stream))
}

/// Generator for trial `index` of the batch seeded with `seed`.
#[must_use]
pub fn trial_rng(seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(derive_seed(seed, index))
}
