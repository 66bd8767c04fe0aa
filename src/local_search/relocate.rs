//! Relocate one interior stop to another interior position.

use rand::Rng;

use super::swap::distinct_interior_pair;

/// Removes the stop at `from` and reinserts it at `to`.
///
/// `to` indexes the tour after removal.
pub fn relocate_position(tour: &[usize], from: usize, to: usize) -> Vec<usize> {
    let mut next = tour.to_vec();
    let stop = next.remove(from);
    next.insert(to, stop);
    next
}

/// Moves a random interior stop to a different interior position.
pub fn random_relocate<R: Rng>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    let (from, to) = distinct_interior_pair(tour.len(), rng);
    relocate_position(tour, from, to)
}
