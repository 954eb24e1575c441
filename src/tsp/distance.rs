//! Symmetric pairwise distance table.

use crate::error::LnsError;
use std::collections::HashMap;

/// Euclidean distance between two planar points.
pub fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Immutable distance lookup over a complete, symmetric graph of cities
/// `0..n`.
///
/// The table is validated when it is built: every unordered pair must be
/// present, so a successfully constructed table never reports a missing
/// distance for two distinct valid cities.
///
/// # Examples
///
/// ```
/// use lns_tsp::tsp::DistanceTable;
///
/// let table = DistanceTable::from_points(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]).unwrap();
/// assert_eq!(table.city_count(), 3);
/// assert_eq!(table.lookup(1, 2).unwrap(), 5.0);
/// assert_eq!(table.lookup(2, 1).unwrap(), 5.0);
/// ```
///
/// With the `serde` feature the table serializes for reporting, but can
/// only be built through the validating constructors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistanceTable {
    n: usize,
    /// Row-major `n * n` matrix; both orientations hold the same value.
    matrix: Vec<f64>,
}

impl DistanceTable {
    /// Builds a table from unordered pairs `((a, b), distance)`.
    ///
    /// The city count is derived from the largest index present. Pairs may
    /// be given in either orientation; supplying both orientations is only
    /// accepted when they agree.
    ///
    /// # Errors
    ///
    /// - [`LnsError::InvalidCityIndex`] if an index leaves no room for a city count
    /// - [`LnsError::InsufficientCities`] if fewer than 3 cities are referenced
    /// - [`LnsError::SelfLoop`] for a pair `(i, i)`
    /// - [`LnsError::InvalidDistance`] for a negative or non-finite distance
    /// - [`LnsError::AsymmetricDistance`] if two orientations disagree
    /// - [`LnsError::DistanceNotFound`] for the first missing pair
    pub fn from_pairs<I>(pairs: I) -> Result<Self, LnsError>
    where
        I: IntoIterator<Item = ((usize, usize), f64)>,
    {
        let mut n = 0usize;
        let mut distances: HashMap<(usize, usize), f64> = HashMap::new();
        for ((a, b), distance) in pairs {
            let hi = a.max(b);
            let count = hi.checked_add(1).ok_or(LnsError::InvalidCityIndex {
                index: hi,
                city_count: usize::MAX,
            })?;
            n = n.max(count);

            if a == b {
                return Err(LnsError::SelfLoop { city: a });
            }
            if !distance.is_finite() || distance < 0.0 {
                return Err(LnsError::InvalidDistance { a, b, distance });
            }
            let lo = a.min(b);
            match distances.insert((lo, hi), distance) {
                Some(existing) if existing != distance => {
                    return Err(LnsError::AsymmetricDistance { a: lo, b: hi });
                }
                _ => {}
            }
        }
        if n < 3 {
            return Err(LnsError::InsufficientCities { count: n });
        }

        // Keys are distinct pairs `lo < hi < n`, so the map is complete
        // exactly when it holds n(n-1)/2 of them.
        let required = n.checked_mul(n - 1).map(|m| m / 2);
        if required != Some(distances.len()) {
            for a in 0..n {
                for b in (a + 1)..n {
                    if !distances.contains_key(&(a, b)) {
                        return Err(LnsError::DistanceNotFound { a, b });
                    }
                }
            }
        }

        let cells = n.checked_mul(n).ok_or(LnsError::InvalidCityIndex {
            index: n - 1,
            city_count: n,
        })?;
        let mut matrix = vec![0.0; cells];
        for ((a, b), d) in distances {
            matrix[a * n + b] = d;
            matrix[b * n + a] = d;
        }

        Ok(Self { n, matrix })
    }

    /// Builds the complete Euclidean table for planar coordinates.
    ///
    /// City `i` is `points[i]`.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, LnsError> {
        let n = points.len();
        let pairs = (0..n).flat_map(|a| {
            ((a + 1)..n).map(move |b| ((a, b), euclidean(points[a], points[b])))
        });
        Self::from_pairs(pairs)
    }

    /// Number of cities covered by the table.
    pub fn city_count(&self) -> usize {
        self.n
    }

    /// Returns the distance between two distinct cities.
    ///
    /// `lookup(a, b)` and `lookup(b, a)` resolve to the same stored value.
    ///
    /// # Errors
    ///
    /// [`LnsError::InvalidCityIndex`] if either index is out of range,
    /// [`LnsError::DistanceNotFound`] if `a == b`.
    #[inline]
    pub fn lookup(&self, a: usize, b: usize) -> Result<f64, LnsError> {
        for index in [a, b] {
            if index >= self.n {
                return Err(LnsError::InvalidCityIndex {
                    index,
                    city_count: self.n,
                });
            }
        }
        if a == b {
            return Err(LnsError::DistanceNotFound { a, b });
        }
        Ok(self.matrix[a * self.n + b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DistanceTable {
        DistanceTable::from_pairs([((0, 1), 1.0), ((0, 2), 2.0), ((1, 2), 2.5)]).unwrap()
    }

    #[test]
    fn test_lookup_symmetric() {
        let table = triangle();
        for a in 0..3 {
            for b in 0..3 {
                if a != b {
                    assert_eq!(table.lookup(a, b), table.lookup(b, a));
                }
            }
        }
        assert!((table.lookup(2, 1).unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_city_count_from_max_index() {
        assert_eq!(triangle().city_count(), 3);
    }

    #[test]
    fn test_reversed_orientation_accepted() {
        let table =
            DistanceTable::from_pairs([((1, 0), 1.0), ((2, 0), 2.0), ((2, 1), 2.5)]).unwrap();
        assert_eq!(table, triangle());
    }

    #[test]
    fn test_missing_pair_detected_eagerly() {
        let err = DistanceTable::from_pairs([((0, 1), 1.0), ((1, 2), 1.0)]).unwrap_err();
        assert_eq!(err, LnsError::DistanceNotFound { a: 0, b: 2 });
    }

    #[test]
    fn test_insufficient_cities() {
        let err = DistanceTable::from_pairs([((0, 1), 1.0)]).unwrap_err();
        assert_eq!(err, LnsError::InsufficientCities { count: 2 });

        let err = DistanceTable::from_pairs(Vec::new()).unwrap_err();
        assert_eq!(err, LnsError::InsufficientCities { count: 0 });
    }

    #[test]
    fn test_invalid_entries_rejected() {
        let err = DistanceTable::from_pairs([((0, 1), -1.0), ((0, 2), 1.0), ((1, 2), 1.0)])
            .unwrap_err();
        assert!(matches!(err, LnsError::InvalidDistance { a: 0, b: 1, .. }));

        let err = DistanceTable::from_pairs([((0, 1), f64::NAN), ((0, 2), 1.0), ((1, 2), 1.0)])
            .unwrap_err();
        assert!(matches!(err, LnsError::InvalidDistance { .. }));

        let err = DistanceTable::from_pairs([((1, 1), 0.0), ((0, 2), 1.0)]).unwrap_err();
        assert_eq!(err, LnsError::SelfLoop { city: 1 });

        let err = DistanceTable::from_pairs([
            ((0, 1), 1.0),
            ((1, 0), 2.0),
            ((0, 2), 1.0),
            ((1, 2), 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, LnsError::AsymmetricDistance { a: 0, b: 1 });
    }

    #[test]
    fn test_index_overflow_rejected() {
        let err = DistanceTable::from_pairs([
            ((0, 1), 1.0),
            ((0, 2), 1.0),
            ((1, 2), 1.0),
            ((0, usize::MAX), 1.0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            LnsError::InvalidCityIndex {
                index: usize::MAX,
                ..
            }
        ));
    }

    #[test]
    fn test_sparse_large_index_reports_missing_pair() {
        let err = DistanceTable::from_pairs([
            ((0, 1), 1.0),
            ((0, 2), 1.0),
            ((1, 2), 1.0),
            ((0, 1usize << 33), 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, LnsError::DistanceNotFound { a: 0, b: 3 });
    }

    #[test]
    fn test_duplicate_pairs_do_not_mask_missing_one() {
        let err = DistanceTable::from_pairs([
            ((0, 1), 1.0),
            ((1, 0), 1.0),
            ((0, 1), 1.0),
            ((1, 2), 1.0),
        ])
        .unwrap_err();
        assert_eq!(err, LnsError::DistanceNotFound { a: 0, b: 2 });
    }

    #[test]
    fn test_lookup_errors() {
        let table = triangle();
        assert_eq!(
            table.lookup(0, 3),
            Err(LnsError::InvalidCityIndex {
                index: 3,
                city_count: 3
            })
        );
        assert_eq!(
            table.lookup(1, 1),
            Err(LnsError::DistanceNotFound { a: 1, b: 1 })
        );
    }

    #[test]
    fn test_from_points_rectangle() {
        let table =
            DistanceTable::from_points(&[(0.0, 0.0), (0.0, 3.0), (4.0, 3.0), (4.0, 0.0)]).unwrap();
        assert_eq!(table.city_count(), 4);
        assert!((table.lookup(0, 1).unwrap() - 3.0).abs() < 1e-12);
        assert!((table.lookup(0, 2).unwrap() - 5.0).abs() < 1e-12);
        assert!((table.lookup(3, 0).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_euclidean() {
        assert!((euclidean((1.0, 1.0), (4.0, 5.0)) - 5.0).abs() < 1e-12);
        assert_eq!(euclidean((2.0, 2.0), (2.0, 2.0)), 0.0);
    }
}
