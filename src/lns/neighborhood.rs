//! Random neighborhood selection.

use crate::error::LnsError;
use rand::Rng;

/// Checks that `k` positions can be drawn from `1..n`.
pub(crate) fn check_neighborhood_size(k: usize, n: usize) -> Result<(), LnsError> {
    let max = n.saturating_sub(1);
    if k == 0 || k > max {
        return Err(LnsError::InvalidNeighborhoodSize { size: k, max });
    }
    Ok(())
}

/// Draws `k` distinct tour positions uniformly from `1..n`.
///
/// Position 0 holds the anchor city and is never perturbed. The returned
/// order is the sampling order, which also fixes the order in which the
/// cities at those positions are rearranged.
///
/// # Errors
///
/// [`LnsError::InvalidNeighborhoodSize`] if `k == 0` or `k > n - 1`.
pub fn select_neighborhood<R: Rng + ?Sized>(
    k: usize,
    n: usize,
    rng: &mut R,
) -> Result<Vec<usize>, LnsError> {
    check_neighborhood_size(k, n)?;
    Ok(rand::seq::index::sample(rng, n - 1, k)
        .iter()
        .map(|i| i + 1)
        .collect())
}
