//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while building a distance table or running the search.
///
/// Errors are returned from the operation that detects them and are never
/// retried internally. A failed round leaves the solver's committed state
/// untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LnsError {
    #[error("city index {index} is out of range for {city_count} cities")]
    InvalidCityIndex { index: usize, city_count: usize },

    #[error("no distance between cities {a} and {b}")]
    DistanceNotFound { a: usize, b: usize },

    #[error("neighborhood size {size} is invalid, expected 1..={max}")]
    InvalidNeighborhoodSize { size: usize, max: usize },

    #[error("at least 3 cities are required to form a cycle, got {count}")]
    InsufficientCities { count: usize },

    #[error("distance {distance} between cities {a} and {b} must be finite and non-negative")]
    InvalidDistance { a: usize, b: usize, distance: f64 },

    #[error("city {city} has a distance to itself")]
    SelfLoop { city: usize },

    #[error("conflicting distances supplied for cities {a} and {b}")]
    AsymmetricDistance { a: usize, b: usize },

    #[error("candidate cap must be positive")]
    InvalidCandidateCap,

    #[error("invalid tour: {0}")]
    InvalidTour(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LnsError::InvalidNeighborhoodSize { size: 7, max: 4 };
        assert_eq!(
            err.to_string(),
            "neighborhood size 7 is invalid, expected 1..=4"
        );

        let err = LnsError::DistanceNotFound { a: 1, b: 3 };
        assert_eq!(err.to_string(), "no distance between cities 1 and 3");
    }
}
