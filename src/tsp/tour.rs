//! Tour representation and cycle length evaluation.

use super::distance::DistanceTable;
use crate::error::LnsError;
use rand::seq::SliceRandom;
use rand::Rng;

/// An ordered visit sequence over cities `0..n`, anchored at city 0.
///
/// Invariant: the order is a permutation of `0..n` with city 0 at
/// position 0. Fixing the anchor removes rotational symmetry; reflections
/// are still distinct tours.
///
/// With the `serde` feature a tour is a plain sequence of city indices;
/// deserialization goes through [`Tour::from_order`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// The tour `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// A uniformly random tour with city 0 fixed at position 0.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut tour = Self::identity(n);
        if n > 1 {
            tour.order[1..].shuffle(rng);
        }
        tour
    }

    /// Wraps a caller-supplied order after checking the tour invariant.
    pub fn from_order(order: Vec<usize>) -> Result<Self, LnsError> {
        let n = order.len();
        if order.first().is_some_and(|&c| c != 0) {
            return Err(LnsError::InvalidTour(format!(
                "city 0 must be at position 0, found {}",
                order[0]
            )));
        }
        let mut seen = vec![false; n];
        for &city in &order {
            if city >= n {
                return Err(LnsError::InvalidCityIndex {
                    index: city,
                    city_count: n,
                });
            }
            if seen[city] {
                return Err(LnsError::InvalidTour(format!("city {city} visited twice")));
            }
            seen[city] = true;
        }
        Ok(Self { order })
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The visit order.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.order
    }

    /// Cities currently at the given positions, in position order.
    pub(crate) fn values_at(&self, positions: &[usize]) -> Vec<usize> {
        positions.iter().map(|&p| self.order[p]).collect()
    }

    /// Writes `values[i]` into position `positions[i]`.
    ///
    /// Callers pass a rearrangement of [`values_at`](Self::values_at) for the
    /// same positions, which keeps the permutation invariant.
    pub(crate) fn assign(&mut self, positions: &[usize], values: &[usize]) {
        debug_assert_eq!(positions.len(), values.len());
        for (&p, &v) in positions.iter().zip(values) {
            self.order[p] = v;
        }
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = LnsError;

    fn try_from(order: Vec<usize>) -> Result<Self, LnsError> {
        Self::from_order(order)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.order
    }
}

/// Total length of the closed cycle described by `tour`.
///
/// Sums every consecutive leg plus the closing leg from the last city back
/// to the first. Runs in O(n).
///
/// # Errors
///
/// Propagates lookup failures from the table, e.g. when the tour references
/// a city the table does not cover.
pub fn tour_length(table: &DistanceTable, tour: &[usize]) -> Result<f64, LnsError> {
    let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
        return Ok(0.0);
    };
    let mut total = table.lookup(last, first)?;
    for leg in tour.windows(2) {
        total += table.lookup(leg[0], leg[1])?;
    }
    Ok(total)
}
