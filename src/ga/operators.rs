//! Volume-vector initialization, crossover, and mutation.

use rand::Rng;

use crate::fitness::settle_volume;

/// Maximum relative change of a mutated gene.
pub const MUTATION_SPREAD: f64 = 0.2;

/// Draws each volume uniformly from 50–150% of its original value.
pub fn randomize_volumes<R: Rng>(original: &[f64], rng: &mut R) -> Vec<f64> {
    original
        .iter()
        .map(|&v| settle_volume(v * (0.5 + rng.random::<f64>())))
        .collect()
}

/// Blend crossover with a fresh blend point per gene.
///
/// For blend point `p`, the first child gets `a·p + b·(1−p)` and the
/// second `b·p + a·(1−p)`.
pub fn blend_crossover<R: Rng>(a: &[f64], b: &[f64], rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let p = rng.random::<f64>();
            (
                settle_volume(x * p + y * (1.0 - p)),
                settle_volume(y * p + x * (1.0 - p)),
            )
        })
        .unzip()
}

/// Changes each gene by up to ±20% with probability `rate`.
pub fn mutate_volumes<R: Rng>(genes: &mut [f64], rate: f64, rng: &mut R) {
    for v in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            let factor = rng.random_range(-MUTATION_SPREAD..MUTATION_SPREAD);
            *v = settle_volume(*v * (1.0 + factor));
        }
    }
}
