//! Random 2-opt segment reversal.
//!
//! # Algorithm
//!
//! Picks `i` in `1..=len-3` and `j` in `i+1..=len-2` and reverses the
//! segment `tour[i..=j]`, which replaces edges `(i-1, i)` and `(j, j+1)`
//! by `(i-1, j)` and `(i, j+1)`. Both depot visits stay in place.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::Rng;

/// Returns a copy of `tour` with `tour[i..=j]` reversed.
///
/// # Examples
///
/// ```
/// use sc_optim::local_search::reverse_segment;
///
/// assert_eq!(reverse_segment(&[0, 1, 2, 3, 4, 0], 1, 3), vec![0, 3, 2, 1, 4, 0]);
/// ```
pub fn reverse_segment(tour: &[usize], i: usize, j: usize) -> Vec<usize> {
    let mut next = tour.to_vec();
    next[i..=j].reverse();
    next
}

/// Reverses a random interior segment of at least two stops.
pub fn random_two_opt<R: Rng>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    let len = tour.len();
    let i = rng.random_range(1..=len - 3);
    let j = rng.random_range(i + 1..=len - 2);
    reverse_segment(tour, i, j)
}
