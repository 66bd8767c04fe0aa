//! Parent selection over a population sorted best-first.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Selection strategy for choosing parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Best of `k` uniformly drawn individuals.
    #[default]
    Tournament,
    /// Fitness-proportionate. Minimized scores are inverted as
    /// `max − score + 1`.
    Roulette,
    /// Linear rank weighting: the i-th best gets weight `n − i`.
    Rank,
}

impl Selection {
    /// Selects a parent index.
    ///
    /// `scores` must be sorted best-first and non-empty; `maximize` gives
    /// the score direction.
    pub fn select<R: Rng>(
        self,
        scores: &[f64],
        maximize: bool,
        tournament_size: usize,
        rng: &mut R,
    ) -> usize {
        match self {
            Selection::Tournament => tournament(scores, maximize, tournament_size, rng),
            Selection::Roulette => roulette(scores, maximize, rng),
            Selection::Rank => rank(scores.len(), rng),
        }
    }
}

fn tournament<R: Rng>(scores: &[f64], maximize: bool, k: usize, rng: &mut R) -> usize {
    let n = scores.len();
    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        let better = if maximize {
            scores[idx] > scores[best]
        } else {
            scores[idx] < scores[best]
        };
        if better {
            best = idx;
        }
    }
    best
}

fn roulette<R: Rng>(scores: &[f64], maximize: bool, rng: &mut R) -> usize {
    let weights: Vec<f64> = if maximize {
        scores.to_vec()
    } else {
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        scores.iter().map(|s| max - s + 1.0).collect()
    };
    spin(&weights, rng)
}

fn rank<R: Rng>(n: usize, rng: &mut R) -> usize {
    let weights: Vec<f64> = (0..n).map(|i| (n - i) as f64).collect();
    spin(&weights, rng)
}

/// Roulette wheel over non-negative weights; uniform if they sum to nothing.
fn spin<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let n = weights.len();
    let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..n);
    }
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w.max(0.0);
        if cumulative > threshold {
            return i;
        }
    }
    n - 1
}
