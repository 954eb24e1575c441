//! Large Neighborhood Search (LNS) for the TSP.
//!
//! LNS repeatedly destroys a small random part of the best-known tour and
//! repairs it by trying alternative orderings of the removed cities,
//! keeping only strict improvements.
//!
//! # References
//!
//! Shaw (1998), "Using Constraint Programming and Local Search Methods to
//! Solve Vehicle Routing Problems"

mod config;
mod neighborhood;
mod permutations;
mod runner;
mod types;

pub use config::LnsConfig;
pub use neighborhood::select_neighborhood;
pub use permutations::{factorial_exceeds, permutations, Enumerated, Permutations, Sampled};
pub use runner::LnsSolver;
pub use types::{ImprovementLog, ImprovementLogEntry, LnsResult, Solution};
