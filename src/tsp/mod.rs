//! Traveling Salesman Problem model.
//!
//! A complete, symmetric distance graph over cities `0..n`, the anchored
//! tour representation, and cycle length evaluation.

mod distance;
mod tour;

pub use distance::{euclidean, DistanceTable};
pub use tour::{tour_length, Tour};
