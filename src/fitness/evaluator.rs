//! Scalar fitness of a volume allocation over a fixed route set.

use super::metrics::FitnessMetrics;
use super::objective::Objective;
use crate::error::OptimError;
use crate::models::Route;

/// Smallest volume any search operator produces.
pub const MIN_VOLUME: f64 = 10.0;

/// Rounds a perturbed volume and floors it at [`MIN_VOLUME`].
pub fn settle_volume(v: f64) -> f64 {
    v.round().max(MIN_VOLUME)
}

/// Scores volume allocations against one route set.
///
/// With no objectives the score is total flow cost and lower is better;
/// with objectives it is the weighted sum and higher is better.
///
/// # Examples
///
/// ```
/// use sc_optim::fitness::FlowEvaluator;
/// use sc_optim::models::Route;
///
/// let routes = vec![Route::new("r", "a", "b").with_cost(2.0).with_volume(50.0)];
/// let eval = FlowEvaluator::new(&routes, &[]).unwrap();
/// assert!(!eval.maximizes());
/// assert_eq!(eval.score(&[50.0]), 100.0);
/// assert!(eval.is_better(80.0, 100.0));
/// ```
#[derive(Debug, Clone)]
pub struct FlowEvaluator<'a> {
    routes: &'a [Route],
    objectives: &'a [Objective],
}

impl<'a> FlowEvaluator<'a> {
    /// Validates every route and objective.
    pub fn new(routes: &'a [Route], objectives: &'a [Objective]) -> Result<Self, OptimError> {
        for route in routes {
            route.validate()?;
        }
        for objective in objectives {
            objective.validate()?;
        }
        Ok(Self { routes, objectives })
    }

    pub fn routes(&self) -> &'a [Route] {
        self.routes
    }

    /// Whether higher scores are better.
    pub fn maximizes(&self) -> bool {
        !self.objectives.is_empty()
    }

    /// The routes' own volumes.
    pub fn input_volumes(&self) -> Vec<f64> {
        self.routes.iter().map(|r| r.volume).collect()
    }

    pub fn metrics(&self, volumes: &[f64]) -> FitnessMetrics {
        FitnessMetrics::compute(self.routes, volumes, self.objectives)
    }

    /// The scalar that the search compares.
    pub fn score(&self, volumes: &[f64]) -> f64 {
        self.score_of(&self.metrics(volumes))
    }

    pub fn score_of(&self, metrics: &FitnessMetrics) -> f64 {
        metrics.weighted_sum.unwrap_or(metrics.cost)
    }

    /// Signed gain of moving from `current` to `candidate`; positive is better.
    pub fn gain(&self, current: f64, candidate: f64) -> f64 {
        if self.maximizes() {
            candidate - current
        } else {
            current - candidate
        }
    }

    /// Whether score `a` is strictly better than `b`.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        self.gain(b, a) > 0.0
    }

    /// Percentage improvement of `best` over `baseline`, 0 for a zero baseline.
    pub fn improvement_pct(&self, baseline: f64, best: f64) -> f64 {
        if baseline == 0.0 || !baseline.is_finite() {
            return 0.0;
        }
        self.gain(baseline, best) / baseline * 100.0
    }

    /// Copies of the routes carrying `volumes`, flagged optimized.
    pub fn apply(&self, volumes: &[f64]) -> Vec<Route> {
        self.routes
            .iter()
            .zip(volumes)
            .map(|(r, &v)| r.optimized_with_volume(v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::ObjectiveMetric;

    #[test]
    fn test_settle_volume() {
        assert_eq!(settle_volume(3.2), 10.0);
        assert_eq!(settle_volume(42.5), 43.0);
        assert_eq!(settle_volume(-5.0), 10.0);
    }

    #[test]
    fn test_rejects_invalid_route() {
        let routes = vec![Route::new("r", "a", "a")];
        assert!(FlowEvaluator::new(&routes, &[]).is_err());
    }

    #[test]
    fn test_direction_follows_objectives() {
        let routes = vec![Route::new("r", "a", "b").with_cost(1.0)];
        let objectives = vec![Objective::new(ObjectiveMetric::Volume, 1.0, false)];
        let eval = FlowEvaluator::new(&routes, &objectives).expect("valid");
        assert!(eval.maximizes());
        assert!(eval.is_better(20.0, 10.0));
        assert_eq!(eval.improvement_pct(10.0, 15.0), 50.0);

        let eval = FlowEvaluator::new(&routes, &[]).expect("valid");
        assert!(eval.is_better(10.0, 20.0));
        assert_eq!(eval.improvement_pct(20.0, 15.0), 25.0);
        assert_eq!(eval.improvement_pct(0.0, 15.0), 0.0);
    }

    #[test]
    fn test_apply_flags_routes() {
        let routes = vec![
            Route::new("r1", "a", "b").with_volume(5.0),
            Route::new("r2", "b", "c").with_volume(5.0),
        ];
        let eval = FlowEvaluator::new(&routes, &[]).expect("valid");
        let out = eval.apply(&[12.0, 30.0]);
        assert_eq!(out[0].volume, 12.0);
        assert_eq!(out[1].volume, 30.0);
        assert!(out.iter().all(|r| r.is_optimized));
        assert_eq!(eval.input_volumes(), vec![5.0, 5.0]);
    }
}
