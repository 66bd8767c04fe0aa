//! Fitness of flow-volume allocations.
//!
//! A solution is a `Vec<f64>` of volumes indexed against a fixed route
//! slice; [`FlowEvaluator`] turns it into [`FitnessMetrics`] and a single
//! comparable score.

mod evaluator;
mod metrics;
mod objective;

pub use evaluator::{settle_volume, FlowEvaluator, MIN_VOLUME};
pub use metrics::FitnessMetrics;
pub use objective::{Objective, ObjectiveMetric};
