//! Solutions, the improvement log, and run summaries.

use crate::tsp::Tour;
use std::time::{Duration, SystemTime};

/// A tour together with its cycle length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// The visit order.
    pub tour: Tour,

    /// Cycle length of `tour`, never negative.
    pub length: f64,
}

/// One strict improvement of the best-known solution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImprovementLogEntry {
    /// Wall-clock time of the improvement.
    pub timestamp: SystemTime,

    /// Monotonic time since the solver was created.
    pub elapsed: Duration,

    /// Snapshot of the new best tour.
    pub tour: Tour,

    /// Length of the new best tour.
    pub length: f64,

    /// Tour positions perturbed in the round that found it.
    pub neighborhood: Vec<usize>,
}

/// Append-only record of best-solution improvements.
///
/// Lengths are strictly decreasing from one entry to the next, since an
/// entry is appended only when the best length strictly improves.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImprovementLog {
    entries: Vec<ImprovementLogEntry>,
}

impl ImprovementLog {
    pub(crate) fn push(&mut self, entry: ImprovementLogEntry) {
        debug_assert!(self.entries.last().is_none_or(|last| entry.length < last.length));
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ImprovementLogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImprovementLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&ImprovementLogEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&ImprovementLogEntry> {
        self.entries.last()
    }

    /// Time between the first and the last improvement.
    ///
    /// Zero when fewer than two improvements were logged.
    pub fn elapsed(&self) -> Duration {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => last.elapsed.saturating_sub(first.elapsed),
            _ => Duration::ZERO,
        }
    }
}

impl<'a> IntoIterator for &'a ImprovementLog {
    type Item = &'a ImprovementLogEntry;
    type IntoIter = std::slice::Iter<'a, ImprovementLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Summary of a `solve` call.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LnsResult {
    /// The best solution found so far.
    pub best: Solution,

    /// Rounds completed by this call.
    pub rounds: usize,

    /// Improvements found by this call.
    pub improvements: usize,

    /// Candidates evaluated by this call.
    pub candidates_evaluated: usize,

    /// Time between the first and last logged improvement.
    pub elapsed: Duration,

    /// Whether the call was cancelled externally.
    pub cancelled: bool,
}
