//! Random neighborhood moves on a depot-anchored tour.
//!
//! A tour is a sequence of node indices whose first and last entries are
//! the depot. Every move keeps both depot visits in place.
//!
//! - [`random_swap`] — exchange two stops
//! - [`random_two_opt`] — reverse a contiguous segment
//! - [`random_relocate`] — move one stop elsewhere

mod relocate;
mod swap;
mod two_opt;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use relocate::{random_relocate, relocate_position};
pub use swap::{random_swap, swap_positions};
pub use two_opt::{random_two_opt, reverse_segment};

/// Smallest tour length (depots included) that admits a move.
pub const MIN_MOVABLE_LEN: usize = 4;

/// Neighborhood operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveKind {
    Swap,
    TwoOpt,
    Relocate,
}

impl MoveKind {
    pub const ALL: [MoveKind; 3] = [MoveKind::Swap, MoveKind::TwoOpt, MoveKind::Relocate];

    /// Picks an operator uniformly.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Applies this operator at random positions.
    ///
    /// Returns `None` if the tour is shorter than [`MIN_MOVABLE_LEN`].
    pub fn apply<R: Rng>(self, tour: &[usize], rng: &mut R) -> Option<Vec<usize>> {
        if tour.len() < MIN_MOVABLE_LEN {
            return None;
        }
        Some(match self {
            MoveKind::Swap => random_swap(tour, rng),
            MoveKind::TwoOpt => random_two_opt(tour, rng),
            MoveKind::Relocate => random_relocate(tour, rng),
        })
    }
}

/// Applies a uniformly chosen operator.
///
/// # Examples
///
/// ```
/// use sc_optim::local_search::apply_random_move;
/// use sc_optim::random::create_rng;
///
/// let mut rng = create_rng(7);
/// assert!(apply_random_move(&[0, 1, 0], &mut rng).is_none());
/// let (_, next) = apply_random_move(&[0, 1, 2, 0], &mut rng).unwrap();
/// assert_eq!(next, vec![0, 2, 1, 0]);
/// ```
pub fn apply_random_move<R: Rng>(tour: &[usize], rng: &mut R) -> Option<(MoveKind, Vec<usize>)> {
    let kind = MoveKind::random(rng);
    kind.apply(tour, rng).map(|next| (kind, next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_too_short_tours_are_skipped() {
        let mut rng = create_rng(1);
        for kind in MoveKind::ALL {
            assert!(kind.apply(&[0, 0], &mut rng).is_none());
            assert!(kind.apply(&[0, 1, 0], &mut rng).is_none());
        }
    }

    #[test]
    fn test_all_operators_are_drawn() {
        let mut rng = create_rng(2);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(MoveKind::random(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_moves_preserve_multiset() {
        let mut rng = create_rng(4);
        let tour = vec![0, 5, 3, 1, 4, 2, 0];
        for _ in 0..300 {
            let (_, next) = apply_random_move(&tour, &mut rng).expect("long enough");
            let mut a = next.clone();
            let mut b = tour.clone();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
            assert_eq!(next[0], 0);
            assert_eq!(next[6], 0);
        }
    }
}
