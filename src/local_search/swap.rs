//! Swap two interior tour positions.

use rand::Rng;

/// Returns a copy of `tour` with positions `i` and `j` exchanged.
pub fn swap_positions(tour: &[usize], i: usize, j: usize) -> Vec<usize> {
    let mut next = tour.to_vec();
    next.swap(i, j);
    next
}

/// Picks two distinct interior positions uniformly.
///
/// `len` is the full tour length including both depot visits and must be
/// at least 4.
pub(crate) fn distinct_interior_pair<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(1..=len - 2);
    let mut j = rng.random_range(1..=len - 3);
    if j >= i {
        j += 1;
    }
    (i, j)
}

/// Swaps two random interior stops.
pub fn random_swap<R: Rng>(tour: &[usize], rng: &mut R) -> Vec<usize> {
    let (i, j) = distinct_interior_pair(tour.len(), rng);
    swap_positions(tour, i, j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_swap_positions() {
        assert_eq!(swap_positions(&[0, 1, 2, 3, 0], 1, 3), vec![0, 3, 2, 1, 0]);
    }

    #[test]
    fn test_pair_is_distinct_and_interior() {
        let mut rng = create_rng(5);
        for len in 4..9 {
            for _ in 0..200 {
                let (i, j) = distinct_interior_pair(len, &mut rng);
                assert_ne!(i, j);
                assert!((1..=len - 2).contains(&i));
                assert!((1..=len - 2).contains(&j));
            }
        }
    }

    #[test]
    fn test_random_swap_keeps_depots() {
        let mut rng = create_rng(11);
        let tour = vec![0, 1, 2, 3, 4, 0];
        for _ in 0..50 {
            let next = random_swap(&tour, &mut rng);
            assert_eq!(next[0], 0);
            assert_eq!(next[5], 0);
            let mut sorted = next.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 0, 1, 2, 3, 4]);
        }
    }
}
