//! Approximate Euclidean TSP solving via Large Neighborhood Search.
//!
//! - **`tsp`**: the problem model: a validated, symmetric distance table,
//!   the anchored tour representation, and cycle length evaluation.
//! - **`lns`**: the destroy-and-repair engine: random neighborhood
//!   selection, candidate permutation generation (exhaustive below a
//!   candidate cap, sampled above it), and the solver with its
//!   improvement log.
//!
//! # Architecture
//!
//! The search is single-threaded and fully deterministic for a given
//! seed. Plotting, export, and instance generation are left to consumers
//! of the improvement log.

pub mod error;
pub mod lns;
pub mod random;
pub mod tsp;

pub use error::LnsError;
