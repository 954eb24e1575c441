//! LNS configuration.

use super::neighborhood::check_neighborhood_size;
use crate::error::LnsError;

/// Configuration for the destroy-and-repair search.
///
/// # Candidate cap
///
/// Each round rearranges the cities at `neighborhood_size` random tour
/// positions. When `neighborhood_size!` is at most `max_candidates`, every
/// non-identity rearrangement is tried exactly once. Otherwise
/// `max_candidates` random rearrangements are drawn, possibly with
/// repeats.
///
/// # Examples
///
/// ```
/// use lns_tsp::lns::LnsConfig;
///
/// let config = LnsConfig::default()
///     .with_rounds(5000)
///     .with_neighborhood_size(5)
///     .with_max_candidates(500)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// assert!(config.validate_for(4).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LnsConfig {
    /// Number of destroy-and-repair rounds run by `solve`.
    pub rounds: usize,

    /// Number of tour positions perturbed per round, in `1..=n-1`.
    pub neighborhood_size: usize,

    /// Upper bound on candidates tried per round.
    pub max_candidates: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for LnsConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            neighborhood_size: 3,
            max_candidates: 1000,
            seed: None,
        }
    }
}

impl LnsConfig {
    pub fn with_rounds(mut self, n: usize) -> Self {
        self.rounds = n;
        self
    }

    pub fn with_neighborhood_size(mut self, k: usize) -> Self {
        self.neighborhood_size = k;
        self
    }

    pub fn with_max_candidates(mut self, cap: usize) -> Self {
        self.max_candidates = cap;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration independently of any instance.
    pub fn validate(&self) -> Result<(), LnsError> {
        if self.neighborhood_size == 0 {
            return Err(LnsError::InvalidConfig(
                "neighborhood_size must be positive".into(),
            ));
        }
        if self.max_candidates == 0 {
            return Err(LnsError::InvalidCandidateCap);
        }
        Ok(())
    }

    /// Validates the configuration against an instance of `city_count` cities.
    pub fn validate_for(&self, city_count: usize) -> Result<(), LnsError> {
        self.validate()?;
        check_neighborhood_size(self.neighborhood_size, city_count)
    }
}
