//! Destroy-and-repair search loop.
//!
//! # Algorithm
//!
//! Each round:
//!
//! 1. **Destroy**: pick `k` random tour positions (never position 0)
//! 2. **Repair**: for every candidate rearrangement of the cities at those
//!    positions, write it into the current tour and evaluate it; a strictly
//!    shorter tour becomes the new best and is logged
//! 3. After every candidate, improving or not, the current tour is reset
//!    to a copy of the best tour
//!
//! Candidates within a round therefore never build on each other: each is
//! applied to the best tour known when it is tried.

use super::config::LnsConfig;
use super::neighborhood::{check_neighborhood_size, select_neighborhood};
use super::permutations::permutations;
use super::types::{ImprovementLog, ImprovementLogEntry, LnsResult, Solution};
use crate::error::LnsError;
use crate::random::{rng_from_option, SearchRng};
use crate::tsp::{tour_length, DistanceTable, Tour};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, info, trace};

/// Large Neighborhood Search solver for one TSP instance.
///
/// Owns the distance table, the current and best solutions, the improvement
/// log, and the random generator. Calling [`run`](Self::run) repeatedly
/// continues from the current best.
///
/// # Examples
///
/// ```
/// use lns_tsp::lns::{LnsConfig, LnsSolver};
/// use lns_tsp::tsp::DistanceTable;
///
/// let table = DistanceTable::from_points(&[
///     (0.0, 0.0), (0.0, 3.0), (4.0, 3.0), (4.0, 0.0),
/// ]).unwrap();
/// let config = LnsConfig::default().with_rounds(50).with_seed(42);
///
/// let mut solver = LnsSolver::new(table, config).unwrap();
/// let result = solver.solve().unwrap();
/// assert!((result.best.length - 14.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LnsSolver {
    table: DistanceTable,
    config: LnsConfig,
    rng: SearchRng,
    state: SearchState,
    candidates_evaluated: usize,
}

/// Mutable search state, kept apart from the generator so a round can
/// iterate candidates while committing improvements.
#[derive(Debug, Clone)]
struct SearchState {
    current: Solution,
    best: Solution,
    log: ImprovementLog,
    neighborhood: Vec<usize>,
    started: Instant,
}

impl SearchState {
    fn evaluate_and_record(&mut self, table: &DistanceTable) -> Result<bool, LnsError> {
        self.current.length = tour_length(table, self.current.tour.as_slice())?;
        if self.current.length >= self.best.length {
            return Ok(false);
        }

        self.best = self.current.clone();
        debug!(
            event = "new_best",
            length = self.best.length,
            neighborhood = ?self.neighborhood,
        );
        self.log.push(ImprovementLogEntry {
            timestamp: SystemTime::now(),
            elapsed: self.started.elapsed(),
            tour: self.best.tour.clone(),
            length: self.best.length,
            neighborhood: self.neighborhood.clone(),
        });
        Ok(true)
    }

    /// Replaces `current` with an independent copy of `best`.
    fn reset_to_best(&mut self) {
        self.current.clone_from(&self.best);
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl LnsSolver {
    /// Creates a solver starting from a random anchored tour.
    ///
    /// The starting tour is drawn from the configured seed, so equal seeds
    /// produce equal searches.
    pub fn new(table: DistanceTable, config: LnsConfig) -> Result<Self, LnsError> {
        config.validate_for(table.city_count())?;
        let mut rng = rng_from_option(config.seed);
        let tour = Tour::random(table.city_count(), &mut rng);
        Self::build(table, config, rng, tour)
    }

    /// Creates a solver starting from a caller-supplied tour.
    pub fn with_initial_tour(
        table: DistanceTable,
        config: LnsConfig,
        tour: Tour,
    ) -> Result<Self, LnsError> {
        config.validate_for(table.city_count())?;
        if tour.len() != table.city_count() {
            return Err(LnsError::InvalidTour(format!(
                "expected {} cities, got {}",
                table.city_count(),
                tour.len()
            )));
        }
        let rng = rng_from_option(config.seed);
        Self::build(table, config, rng, tour)
    }

    fn build(
        table: DistanceTable,
        config: LnsConfig,
        rng: SearchRng,
        tour: Tour,
    ) -> Result<Self, LnsError> {
        let length = tour_length(&table, tour.as_slice())?;
        let current = Solution { tour, length };
        Ok(Self {
            table,
            config,
            rng,
            state: SearchState {
                best: current.clone(),
                current,
                log: ImprovementLog::default(),
                neighborhood: Vec::new(),
                started: Instant::now(),
            },
            candidates_evaluated: 0,
        })
    }

    pub fn table(&self) -> &DistanceTable {
        &self.table
    }

    pub fn config(&self) -> &LnsConfig {
        &self.config
    }

    /// The solution being edited. Equal to [`best`](Self::best) between
    /// candidates.
    pub fn current(&self) -> &Solution {
        &self.state.current
    }

    /// The best solution found so far.
    pub fn best(&self) -> &Solution {
        &self.state.best
    }

    /// Every strict improvement, in order.
    pub fn log(&self) -> &ImprovementLog {
        &self.state.log
    }

    /// Positions perturbed by the most recent round.
    pub fn neighborhood(&self) -> &[usize] {
        &self.state.neighborhood
    }

    /// Total candidates evaluated over the solver's lifetime.
    pub fn candidates_evaluated(&self) -> usize {
        self.candidates_evaluated
    }

    /// Evaluates `current` and commits it as the new best if strictly shorter.
    ///
    /// Returns whether the best solution improved. An improvement appends a
    /// log entry tagged with the current neighborhood.
    pub fn evaluate_and_record(&mut self) -> Result<bool, LnsError> {
        self.state.evaluate_and_record(&self.table)
    }

    /// Runs one destroy-and-repair round.
    ///
    /// Returns the number of improvements found in the round. On error the
    /// committed best is unchanged and `current` equals it.
    pub fn destroy_and_repair(&mut self, k: usize, cap: usize) -> Result<usize, LnsError> {
        if cap == 0 {
            return Err(LnsError::InvalidCandidateCap);
        }
        let neighborhood = select_neighborhood(k, self.table.city_count(), &mut self.rng)?;
        let original = self.state.current.tour.values_at(&neighborhood);
        self.state.neighborhood = neighborhood;

        let mut improvements = 0;
        for candidate in permutations(&original, cap, &mut self.rng) {
            let state = &mut self.state;
            state.current.tour.assign(&state.neighborhood, &candidate);
            let outcome = state.evaluate_and_record(&self.table);
            state.reset_to_best();
            self.candidates_evaluated += 1;
            if outcome? {
                improvements += 1;
            }
        }

        trace!(
            event = "round_end",
            neighborhood = ?self.state.neighborhood,
            improvements,
            best = self.state.best.length,
        );
        Ok(improvements)
    }

    /// Runs `rounds` destroy-and-repair rounds in sequence.
    ///
    /// `k` and `cap` are validated before the first round, so an invalid
    /// request leaves the solver untouched.
    pub fn run(&mut self, rounds: usize, k: usize, cap: usize) -> Result<usize, LnsError> {
        self.run_with_cancel(rounds, k, cap, None)
            .map(|(_, improvements)| improvements)
    }

    /// Like [`run`](Self::run), checking `cancel` before each round.
    ///
    /// Returns `(rounds_completed, improvements)`.
    pub fn run_with_cancel(
        &mut self,
        rounds: usize,
        k: usize,
        cap: usize,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<(usize, usize), LnsError> {
        check_neighborhood_size(k, self.table.city_count())?;
        if cap == 0 {
            return Err(LnsError::InvalidCandidateCap);
        }

        let mut improvements = 0;
        for round in 0..rounds {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return Ok((round, improvements));
                }
            }
            improvements += self.destroy_and_repair(k, cap)?;
        }
        Ok((rounds, improvements))
    }

    /// Runs the configured number of rounds and summarizes the outcome.
    pub fn solve(&mut self) -> Result<LnsResult, LnsError> {
        self.solve_with_cancel(None)
    }

    /// Runs the configured rounds with an optional cancellation flag.
    pub fn solve_with_cancel(
        &mut self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<LnsResult, LnsError> {
        let LnsConfig {
            rounds,
            neighborhood_size,
            max_candidates,
            ..
        } = self.config;
        let evaluated_before = self.candidates_evaluated;
        let start = Instant::now();

        info!(
            event = "solve_start",
            cities = self.table.city_count(),
            rounds,
            neighborhood_size,
            max_candidates,
            initial_length = self.state.best.length,
        );

        let (completed, improvements) =
            self.run_with_cancel(rounds, neighborhood_size, max_candidates, cancel)?;

        info!(
            event = "solve_end",
            rounds = completed,
            improvements,
            best_length = self.state.best.length,
            duration_ms = duration_millis(start.elapsed()),
        );

        Ok(LnsResult {
            best: self.state.best.clone(),
            rounds: completed,
            improvements,
            candidates_evaluated: self.candidates_evaluated - evaluated_before,
            elapsed: self.state.log.elapsed(),
            cancelled: completed < rounds,
        })
    }
}
