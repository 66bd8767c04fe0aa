//! GA evolutionary loop over route volumes.
//!
//! Each generation: score and sort the population best-first, record the
//! generation best, keep `elitism_count` elites, fill the rest by
//! selection and blend crossover (or plain copies of both parents), then
//! mutate every non-elite.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::config::GaConfig;
use super::operators::{blend_crossover, mutate_volumes, randomize_volumes};
use crate::error::OptimError;
use crate::fitness::{FitnessMetrics, FlowEvaluator, Objective};
use crate::models::Route;
use crate::random::rng_from_seed;

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaResult {
    /// Best allocation found, every route flagged optimized.
    pub routes: Vec<Route>,
    /// Improvement of the best score over the input's score.
    pub improvement_pct: f64,
    /// Metrics of the best allocation.
    pub fitness: FitnessMetrics,
    /// Best score after each generation, preceded by the input's score.
    pub best_history: Vec<f64>,
    /// Generations actually run.
    pub generations: usize,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Executes the GA over the volumes of a fixed route set.
///
/// The unmodified input is the initial best, so the result never scores
/// worse than the input.
///
/// # Examples
///
/// ```
/// use sc_optim::ga::{GaConfig, GaRunner};
/// use sc_optim::models::Route;
///
/// let routes = vec![
///     Route::new("r1", "a", "b").with_volume(100.0).with_cost(4.0),
///     Route::new("r2", "b", "c").with_volume(80.0).with_cost(2.0),
/// ];
/// let config = GaConfig::default().with_generations(20).with_seed(7);
/// let result = GaRunner::run(&routes, &[], &config).unwrap();
/// assert_eq!(result.generations, 20);
/// assert!(result.improvement_pct >= 0.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA.
    pub fn run(
        routes: &[Route],
        objectives: &[Objective],
        config: &GaConfig,
    ) -> Result<GaResult, OptimError> {
        Self::run_with_cancel(routes, objectives, config, None)
    }

    /// Runs the GA with an optional cancellation token, checked once per
    /// generation.
    pub fn run_with_cancel(
        routes: &[Route],
        objectives: &[Objective],
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, OptimError> {
        config.validate()?;
        let eval = FlowEvaluator::new(routes, objectives)?;
        let mut rng = rng_from_seed(config.seed);

        let input = eval.input_volumes();
        let input_metrics = eval.metrics(&input);
        let input_score = eval.score_of(&input_metrics);

        if routes.is_empty() {
            warn!("no routes to optimize");
            return Ok(GaResult {
                routes: Vec::new(),
                improvement_pct: 0.0,
                fitness: input_metrics,
                best_history: vec![input_score],
                generations: 0,
                cancelled: false,
            });
        }

        let maximize = eval.maximizes();
        let tournament_size = config.effective_tournament_size();

        info!(
            routes = routes.len(),
            objectives = objectives.len(),
            population = config.population_size,
            generations = config.generations,
            selection = ?config.selection,
            input_score,
            "genetic algorithm started"
        );

        let mut population: Vec<Vec<f64>> = (0..config.population_size)
            .map(|_| randomize_volumes(&input, &mut rng))
            .collect();

        let mut best = input;
        let mut best_metrics = input_metrics;
        let mut best_score = input_score;
        let mut best_history = Vec::with_capacity(config.generations + 1);
        best_history.push(best_score);

        let mut generations = 0usize;
        let mut cancelled = false;

        for generation in 0..config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // Score and sort best-first.
            let mut scored: Vec<(f64, Vec<f64>)> = population
                .into_iter()
                .map(|genes| (eval.score(&genes), genes))
                .collect();
            scored.sort_by(|a, b| {
                if maximize {
                    b.0.total_cmp(&a.0)
                } else {
                    a.0.total_cmp(&b.0)
                }
            });

            if eval.is_better(scored[0].0, best_score) {
                debug!(generation, score = scored[0].0, "new best allocation");
                best.clone_from(&scored[0].1);
                best_metrics = eval.metrics(&best);
                best_score = scored[0].0;
            }

            let scores: Vec<f64> = scored.iter().map(|(s, _)| *s).collect();
            let mut next: Vec<Vec<f64>> = scored[..config.elitism_count]
                .iter()
                .map(|(_, g)| g.clone())
                .collect();

            while next.len() < config.population_size {
                let p1 = config.selection.select(&scores, maximize, tournament_size, &mut rng);
                let p2 = config.selection.select(&scores, maximize, tournament_size, &mut rng);
                let (c1, c2) = if rng.random::<f64>() < config.crossover_rate {
                    blend_crossover(&scored[p1].1, &scored[p2].1, &mut rng)
                } else {
                    (scored[p1].1.clone(), scored[p2].1.clone())
                };
                next.push(c1);
                if next.len() < config.population_size {
                    next.push(c2);
                }
            }

            for genes in &mut next[config.elitism_count..] {
                mutate_volumes(genes, config.mutation_rate, &mut rng);
            }

            population = next;
            generations += 1;
            best_history.push(best_score);
        }

        // Offspring of the last generation have not been scored yet.
        if let Some((score, genes)) = population
            .iter()
            .map(|g| (eval.score(g), g))
            .reduce(|a, b| if eval.is_better(b.0, a.0) { b } else { a })
        {
            if eval.is_better(score, best_score) {
                best.clone_from(genes);
                best_metrics = eval.metrics(&best);
                best_score = score;
                if let Some(last) = best_history.last_mut() {
                    *last = best_score;
                }
            }
        }

        if cancelled {
            warn!(generations, "genetic algorithm cancelled");
        }

        let improvement_pct = eval.improvement_pct(input_score, best_score);
        info!(
            generations,
            best_score,
            improvement_pct,
            "genetic algorithm finished"
        );

        Ok(GaResult {
            routes: eval.apply(&best),
            improvement_pct,
            fitness: best_metrics,
            best_history,
            generations,
            cancelled,
        })
    }
}
