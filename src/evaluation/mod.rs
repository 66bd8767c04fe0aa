//! Edge model and tour evaluation for single-vehicle planning.
//!
//! - [`build_feasible_routes`] — restriction-filtered, costed road edges
//! - [`TourEvaluator`] — tour cost and time-window schedule over an edge set

mod edge_model;
mod evaluator;

pub use edge_model::{
    build_feasible_routes, edge_cost, is_edge_feasible, travel_time_minutes,
    MAX_ZONE_EMISSIONS_CLASS,
};
pub use evaluator::{ScheduleViolation, TourEvaluator, MISSING_EDGE_PENALTY};
