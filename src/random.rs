//! Seedable random number generation.
//!
//! The solver owns a single generator and passes it explicitly to every
//! component that consumes entropy, so identical seeds replay identical
//! searches.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator type owned by the solver.
pub type SearchRng = ChaCha8Rng;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> SearchRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a generator from an explicit seed, or from OS entropy when absent.
pub fn rng_from_option(seed: Option<u64>) -> SearchRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
