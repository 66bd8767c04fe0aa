//! SA execution loop over route volumes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::config::SaConfig;
use crate::error::OptimError;
use crate::fitness::{settle_volume, FitnessMetrics, FlowEvaluator, Objective};
use crate::models::Route;
use crate::random::rng_from_seed;

/// Chance that a sampled route is actually perturbed.
const TOUCH_PROBABILITY: f64 = 0.3;

/// Maximum relative change of a perturbed volume.
const MAX_PERTURBATION: f64 = 0.3;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaResult {
    /// Best allocation found, every route flagged optimized.
    pub routes: Vec<Route>,
    /// Improvement of the best score over the input's score.
    pub improvement_pct: f64,
    /// Metrics of the best allocation.
    pub fitness: FitnessMetrics,
    /// Best score after each iteration, preceded by the input's score.
    pub best_history: Vec<f64>,
    /// Iterations actually run.
    pub iterations: usize,
    /// Accepted moves, improving or not.
    pub accepted_moves: usize,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Executes Simulated Annealing over the volumes of a fixed route set.
///
/// The input allocation is the starting point. Each iteration perturbs a
/// random subset of volumes, accepts the neighbor if it scores better or
/// with the configured acceptance probability otherwise, then cools.
/// Route topology is never changed.
///
/// # Examples
///
/// ```
/// use sc_optim::models::Route;
/// use sc_optim::sa::{SaConfig, SaRunner};
///
/// let routes = vec![
///     Route::new("r1", "a", "b").with_volume(100.0).with_cost(4.0),
///     Route::new("r2", "b", "c").with_volume(80.0).with_cost(2.0),
/// ];
/// let config = SaConfig::default().with_iterations(500).with_seed(7);
/// let result = SaRunner::run(&routes, &[], &config).unwrap();
/// assert_eq!(result.routes.len(), 2);
/// assert!(result.improvement_pct >= 0.0);
/// ```
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization.
    pub fn run(
        routes: &[Route],
        objectives: &[Objective],
        config: &SaConfig,
    ) -> Result<SaResult, OptimError> {
        Self::run_with_cancel(routes, objectives, config, None)
    }

    /// Runs SA with an optional cancellation token, checked every iteration.
    pub fn run_with_cancel(
        routes: &[Route],
        objectives: &[Objective],
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult, OptimError> {
        config.validate()?;
        let eval = FlowEvaluator::new(routes, objectives)?;
        let mut rng = rng_from_seed(config.seed);

        let initial = eval.input_volumes();
        let initial_metrics = eval.metrics(&initial);
        let initial_score = eval.score_of(&initial_metrics);

        if routes.is_empty() {
            warn!("no routes to optimize");
            return Ok(SaResult {
                routes: Vec::new(),
                improvement_pct: 0.0,
                fitness: initial_metrics,
                best_history: vec![initial_score],
                iterations: 0,
                accepted_moves: 0,
                cancelled: false,
            });
        }

        info!(
            routes = routes.len(),
            objectives = objectives.len(),
            iterations = config.iterations,
            cooling = ?config.cooling,
            acceptance = ?config.acceptance,
            initial_score,
            "simulated annealing started"
        );

        let mut current = initial.clone();
        let mut current_score = initial_score;
        let mut best = initial;
        let mut best_metrics = initial_metrics;
        let mut best_score = initial_score;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut cancelled = false;
        let mut best_history = Vec::with_capacity(config.iterations + 1);
        best_history.push(best_score);

        for t in 0..config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let neighbor = perturb(&current, config.neighborhood_size, &mut rng);
            let neighbor_metrics = eval.metrics(&neighbor);
            let neighbor_score = eval.score_of(&neighbor_metrics);
            let delta = eval.gain(current_score, neighbor_score);

            let accept = delta > 0.0
                || rng.random::<f64>() < config.acceptance.probability(delta, temperature);
            if accept {
                accepted_moves += 1;
                if eval.is_better(neighbor_score, best_score) {
                    debug!(iteration = t, score = neighbor_score, "new best allocation");
                    best.clone_from(&neighbor);
                    best_metrics = neighbor_metrics;
                    best_score = neighbor_score;
                }
                current = neighbor;
                current_score = neighbor_score;
            }

            temperature = config.cooling.next(temperature, t, config);
            iterations += 1;
            best_history.push(best_score);
        }

        if cancelled {
            warn!(iterations, "simulated annealing cancelled");
        }

        let improvement_pct = eval.improvement_pct(initial_score, best_score);
        info!(
            iterations,
            accepted_moves,
            best_score,
            improvement_pct,
            "simulated annealing finished"
        );

        Ok(SaResult {
            routes: eval.apply(&best),
            improvement_pct,
            fitness: best_metrics,
            best_history,
            iterations,
            accepted_moves,
            cancelled,
        })
    }
}

/// Perturbs up to `neighborhood_size` percent of the volumes.
///
/// Positions are drawn with replacement; each draw changes its volume by
/// up to ±30% with probability 0.3.
pub(crate) fn perturb<R: Rng>(volumes: &[f64], neighborhood_size: f64, rng: &mut R) -> Vec<f64> {
    let mut next = volumes.to_vec();
    let n = next.len();
    if n == 0 {
        return next;
    }
    let draws = ((n as f64 * neighborhood_size / 100.0).floor() as usize).max(1);
    for _ in 0..draws {
        let i = rng.random_range(0..n);
        if rng.random::<f64>() < TOUCH_PROBABILITY {
            let factor = rng.random_range(-MAX_PERTURBATION..MAX_PERTURBATION);
            next[i] = settle_volume(next[i] * (1.0 + factor));
        }
    }
    next
}
