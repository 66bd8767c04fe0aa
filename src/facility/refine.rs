//! Multi-start local refinement of a facility location.
//!
//! # Algorithm
//!
//! Starting from the weighted mean, each restart jumps to a uniformly
//! random point within `max_offset_deg` of it and runs a compass search:
//! evaluate the four points one step north, south, east, and west, move
//! to the best one if it lowers the total weighted distance, otherwise
//! halve the step. A restart ends when the step drops below
//! `min_step_deg` or after `max_iterations` rounds. The best point across
//! all restarts, or the baseline if nothing beat it, is returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::centroid::{total_weighted_distance, weighted_mean};
use crate::distance::DistanceMethod;
use crate::error::OptimError;
use crate::models::{GeoPoint, Node};

/// Largest accepted restart offset, in degrees.
pub const MAX_OFFSET_DEG: f64 = 180.0;

/// Configuration for [`refine_location`].
///
/// # Examples
///
/// ```
/// use sc_optim::distance::DistanceMethod;
/// use sc_optim::facility::RefineConfig;
///
/// let config = RefineConfig::default()
///     .with_restarts(4)
///     .with_method(DistanceMethod::Euclidean);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefineConfig {
    /// Number of independent random restarts.
    pub restarts: usize,
    /// Maximum restart offset from the baseline, in degrees per axis.
    pub max_offset_deg: f64,
    /// Initial compass step in degrees.
    pub initial_step_deg: f64,
    /// Search stops once the step falls below this.
    pub min_step_deg: f64,
    /// Maximum compass rounds per restart.
    pub max_iterations: usize,
    /// Distance used in the objective.
    pub method: DistanceMethod,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            restarts: 10,
            max_offset_deg: 1.0,
            initial_step_deg: 0.1,
            min_step_deg: 0.001,
            max_iterations: 50,
            method: DistanceMethod::Haversine,
        }
    }
}

impl RefineConfig {
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_max_offset(mut self, degrees: f64) -> Self {
        self.max_offset_deg = degrees;
        self
    }

    pub fn with_initial_step(mut self, degrees: f64) -> Self {
        self.initial_step_deg = degrees;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_method(mut self, method: DistanceMethod) -> Self {
        self.method = method;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), OptimError> {
        if !(0.0..=MAX_OFFSET_DEG).contains(&self.max_offset_deg) {
            return Err(OptimError::InvalidConfig(format!(
                "max_offset_deg must be within [0, 180], got {}",
                self.max_offset_deg
            )));
        }
        if !self.min_step_deg.is_finite() || self.min_step_deg <= 0.0 {
            return Err(OptimError::InvalidConfig(
                "min_step_deg must be positive".into(),
            ));
        }
        if !self.initial_step_deg.is_finite() || self.initial_step_deg < self.min_step_deg {
            return Err(OptimError::InvalidConfig(
                "initial_step_deg must be at least min_step_deg".into(),
            ));
        }
        Ok(())
    }
}

/// Result of a refinement run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedLocation {
    /// Unrefined weighted mean.
    pub baseline: GeoPoint,
    /// Objective value at the baseline.
    pub baseline_cost: f64,
    /// Best location found (equal to `baseline` if no restart improved it).
    pub best: GeoPoint,
    /// Objective value at `best`.
    pub best_cost: f64,
    /// Restarts actually run.
    pub restarts: usize,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Refines the weighted-mean location by multi-start compass search.
///
/// Returns the `(0, 0)` sentinel with zero costs for an empty node list.
/// The returned `best_cost` is never above `baseline_cost`.
pub fn refine_location<R: Rng>(
    nodes: &[Node],
    config: &RefineConfig,
    rng: &mut R,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<RefinedLocation, OptimError> {
    config.validate()?;

    let baseline = weighted_mean(nodes);
    if nodes.is_empty() {
        return Ok(RefinedLocation {
            baseline,
            baseline_cost: 0.0,
            best: baseline,
            best_cost: 0.0,
            restarts: 0,
            cancelled: false,
        });
    }

    let objective = |p: GeoPoint| total_weighted_distance(nodes, p, config.method);
    let baseline_cost = objective(baseline);
    let mut best = baseline;
    let mut best_cost = baseline_cost;
    let mut restarts = 0;
    let mut cancelled = false;

    for _ in 0..config.restarts {
        if let Some(ref flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
        }

        let offset = config.max_offset_deg;
        let start = baseline.offset(
            rng.random_range(-offset..=offset),
            rng.random_range(-offset..=offset),
        );
        let (point, cost) = compass_search(start, &objective, config);
        restarts += 1;

        if cost < best_cost {
            debug!(restart = restarts, cost, "refinement improved location");
            best = point;
            best_cost = cost;
        }
    }

    info!(
        nodes = nodes.len(),
        restarts,
        baseline_cost,
        best_cost,
        "facility location refined"
    );

    Ok(RefinedLocation {
        baseline,
        baseline_cost,
        best,
        best_cost,
        restarts,
        cancelled,
    })
}

/// Four-direction step search with step halving.
fn compass_search<F>(start: GeoPoint, objective: &F, config: &RefineConfig) -> (GeoPoint, f64)
where
    F: Fn(GeoPoint) -> f64,
{
    let mut current = start;
    let mut current_cost = objective(current);
    let mut step = config.initial_step_deg;

    for _ in 0..config.max_iterations {
        if step < config.min_step_deg {
            break;
        }

        let candidates = [
            current.offset(step, 0.0),
            current.offset(-step, 0.0),
            current.offset(0.0, step),
            current.offset(0.0, -step),
        ];
        let best_move = candidates
            .iter()
            .map(|&p| (p, objective(p)))
            .filter(|(_, c)| c.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match best_move {
            Some((p, c)) if c < current_cost => {
                current = p;
                current_cost = c;
            }
            _ => step /= 2.0,
        }
    }

    (current, current_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;
    use crate::random::create_rng;

    fn demand(id: &str, lat: f64, lng: f64, w: f64) -> Node {
        Node::new(id, NodeKind::Customer, lat, lng).with_weight(w)
    }

    fn skewed_nodes() -> Vec<Node> {
        vec![
            demand("a", 0.0, 0.0, 1.0),
            demand("b", 0.0, 0.5, 1.0),
            demand("c", 0.5, 0.0, 1.0),
            demand("d", 3.0, 3.0, 1.0),
        ]
    }

    #[test]
    fn test_empty_nodes_sentinel() {
        let mut rng = create_rng(1);
        let r = refine_location(&[], &RefineConfig::default(), &mut rng, None).expect("valid");
        assert_eq!(r.best, GeoPoint::new(0.0, 0.0));
        assert_eq!(r.best_cost, 0.0);
        assert_eq!(r.restarts, 0);
    }

    #[test]
    fn test_refinement_never_worse_than_baseline() {
        let mut rng = create_rng(42);
        let r = refine_location(&skewed_nodes(), &RefineConfig::default(), &mut rng, None)
            .expect("valid");
        assert_eq!(r.restarts, 10);
        assert!(r.best_cost <= r.baseline_cost);
        // The outlier drags the mean away from the three clustered points,
        // so local search should find something strictly better.
        assert!(r.best_cost < r.baseline_cost);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let config = RefineConfig::default().with_method(DistanceMethod::Euclidean);
        let a = refine_location(&skewed_nodes(), &config, &mut create_rng(9), None)
            .expect("valid");
        let b = refine_location(&skewed_nodes(), &config, &mut create_rng(9), None)
            .expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = Arc::new(AtomicBool::new(true));
        let r = refine_location(
            &skewed_nodes(),
            &RefineConfig::default(),
            &mut create_rng(3),
            Some(cancel),
        )
        .expect("valid");
        assert!(r.cancelled);
        assert_eq!(r.restarts, 0);
        assert_eq!(r.best, r.baseline);
    }

    #[test]
    fn test_invalid_config() {
        let config = RefineConfig::default().with_initial_step(0.0001);
        assert!(matches!(config.validate(), Err(OptimError::InvalidConfig(_))));
        let config = RefineConfig::default().with_max_offset(f64::NAN);
        assert!(config.validate().is_err());
        let config = RefineConfig::default().with_max_offset(f64::MAX);
        assert!(config.validate().is_err());
        assert!(RefineConfig::default().with_max_offset(MAX_OFFSET_DEG).validate().is_ok());
    }

    #[test]
    fn test_compass_search_converges_on_single_point() {
        let nodes = vec![demand("a", 1.0, 1.0, 1.0)];
        let config = RefineConfig::default().with_method(DistanceMethod::Manhattan);
        let objective = |p: GeoPoint| total_weighted_distance(&nodes, p, config.method);
        let (p, cost) = compass_search(GeoPoint::new(1.3, 0.8), &objective, &config);
        assert!(cost < 2.0, "cost {cost} at {p:?}");
    }
}
