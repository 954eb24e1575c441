//! Candidate rearrangements for a destroyed neighborhood.
//!
//! [`permutations`] switches strategy on the size of the search space:
//!
//! - If `|values|! <= cap`, every permutation except `values` itself is
//!   enumerated once, in lexicographic order of positions.
//! - Otherwise, uniformly random shuffles are drawn and every draw that
//!   differs from `values` is yielded, until `cap` have been yielded.
//!   Draws are independent, so the same permutation may appear more than
//!   once.
//!
//! Both strategies are finite. Callers must not assume either one
//! deduplicates beyond what is stated above.

use rand::seq::SliceRandom;
use rand::Rng;

/// Returns `true` if `k!` exceeds `cap`, without overflowing.
pub fn factorial_exceeds(k: usize, cap: usize) -> bool {
    let mut product: usize = 1;
    for i in 2..=k {
        match product.checked_mul(i) {
            Some(p) if p <= cap => product = p,
            _ => return true,
        }
    }
    product > cap
}

/// Lazily yields non-identity permutations of `values`, at most
/// `max(cap, |values|! - 1)` of them.
///
/// # Examples
///
/// ```
/// use lns_tsp::lns::permutations;
/// use lns_tsp::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let values = [3, 7, 9];
/// let all: Vec<Vec<i32>> = permutations(&values, 1000, &mut rng).collect();
/// assert_eq!(all.len(), 5);
/// assert!(all.iter().all(|p| p.as_slice() != values));
/// ```
pub fn permutations<'a, T, R>(values: &'a [T], cap: usize, rng: &'a mut R) -> Permutations<'a, T, R>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    if factorial_exceeds(values.len(), cap) {
        Permutations::Sampled(Sampled::new(values, cap, rng))
    } else {
        Permutations::Enumerated(Enumerated::new(values))
    }
}

/// Iterator returned by [`permutations`].
pub enum Permutations<'a, T, R: ?Sized> {
    Enumerated(Enumerated<'a, T>),
    Sampled(Sampled<'a, T, R>),
}

impl<T, R> Permutations<'_, T, R>
where
    R: ?Sized,
{
    /// Whether this sequence enumerates exhaustively.
    pub fn is_exhaustive(&self) -> bool {
        matches!(self, Permutations::Enumerated(_))
    }
}

impl<T, R> Iterator for Permutations<'_, T, R>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        match self {
            Permutations::Enumerated(it) => it.next(),
            Permutations::Sampled(it) => it.next(),
        }
    }
}

/// Exhaustive enumeration over position orderings.
pub struct Enumerated<'a, T> {
    values: &'a [T],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T> Enumerated<'a, T> {
    fn new(values: &'a [T]) -> Self {
        let mut indices: Vec<usize> = (0..values.len()).collect();
        // The starting ordering is the identity.
        let done = !next_permutation(&mut indices);
        Self {
            values,
            indices,
            done,
        }
    }
}

impl<T> Iterator for Enumerated<'_, T>
where
    T: Clone + PartialEq,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        while !self.done {
            let perm: Vec<T> = self.indices.iter().map(|&i| self.values[i].clone()).collect();
            self.done = !next_permutation(&mut self.indices);
            // Repeated values can reproduce the input under a non-identity ordering.
            if perm.as_slice() != self.values {
                return Some(perm);
            }
        }
        None
    }
}

/// Random sampling with replacement, capped at `cap` accepted draws.
pub struct Sampled<'a, T, R: ?Sized> {
    values: &'a [T],
    remaining: usize,
    rng: &'a mut R,
}

impl<'a, T, R> Sampled<'a, T, R>
where
    T: PartialEq,
    R: ?Sized,
{
    fn new(values: &'a [T], cap: usize, rng: &'a mut R) -> Self {
        // No arrangement differs from the input when all values are equal.
        let remaining = if values.windows(2).all(|w| w[0] == w[1]) {
            0
        } else {
            cap
        };
        Self {
            values,
            remaining,
            rng,
        }
    }
}

impl<T, R> Iterator for Sampled<'_, T, R>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.remaining == 0 {
            return None;
        }
        let mut perm = self.values.to_vec();
        loop {
            perm.shuffle(&mut *self.rng);
            if perm.as_slice() != self.values {
                self.remaining -= 1;
                return Some(perm);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Advances `indices` to the next lexicographic ordering.
///
/// Returns `false`, leaving `indices` untouched, when it is already the last.
fn next_permutation(indices: &mut [usize]) -> bool {
    let n = indices.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && indices[i - 1] >= indices[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while indices[j] <= indices[i - 1] {
        j -= 1;
    }
    indices.swap(i - 1, j);
    indices[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    #[test]
    fn test_factorial_exceeds() {
        assert!(!factorial_exceeds(0, 1));
        assert!(!factorial_exceeds(1, 1));
        assert!(!factorial_exceeds(4, 24));
        assert!(factorial_exceeds(4, 23));
        assert!(factorial_exceeds(7, 1000));
        assert!(!factorial_exceeds(6, 1000));
        assert!(factorial_exceeds(40, usize::MAX));
    }

    #[test]
    fn test_enumerates_all_non_identity() {
        let mut rng = create_rng(42);
        let values = [5, 1, 8, 3];
        let perms = permutations(&values, 1000, &mut rng);
        assert!(perms.is_exhaustive());

        let perms: Vec<Vec<i32>> = perms.collect();
        assert_eq!(perms.len(), 23);

        let unique: HashSet<Vec<i32>> = perms.iter().cloned().collect();
        assert_eq!(unique.len(), 23);
        assert!(!unique.contains(&values.to_vec()));
        for p in &perms {
            let mut sorted = p.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![1, 3, 5, 8]);
        }
    }

    #[test]
    fn test_enumeration_restartable() {
        let mut rng = create_rng(1);
        let values = [2, 0, 1];
        let first: Vec<Vec<i32>> = permutations(&values, 10, &mut rng).collect();
        let second: Vec<Vec<i32>> = permutations(&values, 10, &mut rng).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_enumeration_at_exact_threshold() {
        let mut rng = create_rng(1);
        let values = [1, 2, 3];
        let perms = permutations(&values, 6, &mut rng);
        assert!(perms.is_exhaustive());
        assert_eq!(perms.count(), 5);
    }

    #[test]
    fn test_sampling_yields_cap() {
        let mut rng = create_rng(42);
        let values: Vec<usize> = (10..18).collect();
        let perms = permutations(&values, 100, &mut rng);
        assert!(!perms.is_exhaustive());

        let perms: Vec<Vec<usize>> = perms.collect();
        assert_eq!(perms.len(), 100);
        assert!(perms.iter().all(|p| *p != values));
    }

    #[test]
    fn test_sampling_may_repeat() {
        // 3! = 6 > cap forces sampling over a tiny space.
        let mut rng = create_rng(7);
        let values = [1, 2, 3];
        let perms: Vec<Vec<i32>> = permutations(&values, 5, &mut rng).collect();
        assert_eq!(perms.len(), 5);
        assert!(perms.iter().all(|p| p.as_slice() != values));

        let mut rng = create_rng(7);
        let many: Vec<Vec<i32>> = Sampled::new(&values, 200, &mut rng).collect();
        let unique: HashSet<Vec<i32>> = many.into_iter().collect();
        assert!(unique.len() <= 5);
    }

    #[test]
    fn test_degenerate_inputs_empty() {
        let mut rng = create_rng(0);
        let empty: [u8; 0] = [];
        assert_eq!(permutations(&empty, 10, &mut rng).count(), 0);
        assert_eq!(permutations(&[4], 10, &mut rng).count(), 0);
        assert_eq!(permutations(&[4, 4, 4], 1, &mut rng).count(), 0);
    }

    #[test]
    fn test_repeated_values_skip_input() {
        let mut rng = create_rng(0);
        let values = [1, 1, 2];
        let perms: Vec<Vec<i32>> = permutations(&values, 100, &mut rng).collect();
        assert!(perms.iter().all(|p| p.as_slice() != values));
        assert_eq!(perms.len(), 4);
    }

    #[test]
    fn test_next_permutation_order() {
        let mut idx = vec![0, 1, 2];
        let mut seen = vec![idx.clone()];
        while next_permutation(&mut idx) {
            seen.push(idx.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
        assert_eq!(idx, vec![2, 1, 0]);
    }
}
