//! Single-vehicle tour planning by randomized hill climbing.
//!
//! # Algorithm
//!
//! 1. Pick the depot: the first depot, warehouse, or distribution node,
//!    else node 0.
//! 2. Build the naive tour `depot → customers in input order → depot`.
//! 3. For `max_iterations` rounds, apply a uniformly chosen swap, 2-opt,
//!    or relocate move. With time windows enabled, an infeasible
//!    candidate is discarded before costing. A candidate replaces the
//!    current tour only if it is strictly cheaper.
//!
//! Legs with no edge in the supplied route set cost
//! [`MISSING_EDGE_PENALTY`](crate::evaluation::MISSING_EDGE_PENALTY), so
//! the search steers away from them but never fails on them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::params::RoutePlanningParams;
use crate::error::OptimError;
use crate::evaluation::{build_feasible_routes, TourEvaluator};
use crate::local_search::apply_random_move;
use crate::models::{Node, Route, TimeWindow, Vehicle};
use crate::random::rng_from_seed;

/// Result of a tour planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPlan {
    /// Node ids in visiting order, starting and ending at the depot.
    pub tour: Vec<String>,
    /// Consecutive legs of the tour, flagged optimized, carrying the
    /// vehicle capacity as volume. Legs with no edge are omitted.
    pub routes: Vec<Route>,
    /// Cost of the naive tour.
    pub initial_cost: f64,
    /// Cost of the returned tour.
    pub best_cost: f64,
    /// `(initial − best) / initial · 100`, or 0 when the initial cost is 0.
    pub cost_reduction_pct: f64,
    /// Search rounds actually run.
    pub iterations: usize,
    /// Accepted improving moves.
    pub improvements: usize,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Index of the depot: first depot-like node, else 0.
pub fn select_depot(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .position(|n| n.kind.is_depot_like())
        .unwrap_or(0)
}

/// Indices of the stops to visit, in input order.
///
/// Customer and retail nodes when any exist, otherwise every node except
/// the depot.
pub fn select_customers(nodes: &[Node], depot: usize) -> Vec<usize> {
    let tagged: Vec<usize> = (0..nodes.len())
        .filter(|&i| i != depot && nodes[i].kind.is_customer_like())
        .collect();
    if !tagged.is_empty() {
        return tagged;
    }
    (0..nodes.len()).filter(|&i| i != depot).collect()
}

/// Plans and improves a depot-anchored tour over an existing edge set.
///
/// Returns [`OptimError::EmptyInput`] for an empty node list and the
/// validation error of the first malformed node, route, vehicle, or
/// parameter.
/// With fewer than two customers the naive tour is returned unimproved.
///
/// # Examples
///
/// ```
/// use sc_optim::evaluation::build_feasible_routes;
/// use sc_optim::models::{Node, NodeKind, Vehicle};
/// use sc_optim::planning::{plan_tour, RoutePlanningParams};
/// use sc_optim::random::create_rng;
///
/// let nodes = vec![
///     Node::new("depot", NodeKind::Depot, 0.0, 0.0),
///     Node::new("a", NodeKind::Customer, 0.0, 2.0),
///     Node::new("b", NodeKind::Customer, 0.0, 1.0),
///     Node::new("c", NodeKind::Customer, 0.0, 3.0),
/// ];
/// let vehicle = Vehicle::new("truck", 100.0);
/// let params = RoutePlanningParams::default();
/// let routes = build_feasible_routes(&nodes, &vehicle, &params).expect("valid input");
///
/// let plan = plan_tour(&nodes, &routes, &vehicle, &params, &[], &mut create_rng(1), None)
///     .expect("valid input");
/// assert_eq!(plan.tour.first().map(String::as_str), Some("depot"));
/// assert_eq!(plan.tour.last().map(String::as_str), Some("depot"));
/// assert!(plan.best_cost <= plan.initial_cost);
/// ```
pub fn plan_tour<R: Rng>(
    nodes: &[Node],
    routes: &[Route],
    vehicle: &Vehicle,
    params: &RoutePlanningParams,
    time_windows: &[TimeWindow],
    rng: &mut R,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<TourPlan, OptimError> {
    params.validate()?;
    vehicle.validate()?;
    if nodes.is_empty() {
        return Err(OptimError::EmptyInput("nodes"));
    }
    for node in nodes {
        node.validate()?;
    }
    for route in routes {
        route.validate()?;
    }

    let depot = select_depot(nodes);
    let customers = select_customers(nodes, depot);

    let mut tour = Vec::with_capacity(customers.len() + 2);
    tour.push(depot);
    if !customers.is_empty() {
        tour.extend_from_slice(&customers);
        tour.push(depot);
    }

    let evaluator = TourEvaluator::new(nodes, routes)
        .with_time_windows(time_windows, params.service_time_minutes);
    let initial_cost = evaluator.tour_cost(&tour);

    info!(
        nodes = nodes.len(),
        customers = customers.len(),
        routes = routes.len(),
        depot = %nodes[depot].id,
        initial_cost,
        "tour planning started"
    );

    let mut current_cost = initial_cost;
    let mut iterations = 0;
    let mut improvements = 0;
    let mut cancelled = false;

    if customers.len() >= 2 {
        for _ in 0..params.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            iterations += 1;

            let Some((kind, candidate)) = apply_random_move(&tour, rng) else {
                continue;
            };
            if params.consider_time_windows && !evaluator.is_schedule_feasible(&candidate) {
                continue;
            }
            let cost = evaluator.tour_cost(&candidate);
            if cost < current_cost {
                debug!(iteration = iterations, ?kind, cost, "tour improved");
                tour = candidate;
                current_cost = cost;
                improvements += 1;
            }
        }
    }

    if cancelled {
        warn!(iterations, "tour planning cancelled");
    }

    let cost_reduction_pct = if initial_cost > 0.0 {
        (initial_cost - current_cost) / initial_cost * 100.0
    } else {
        0.0
    };

    info!(
        iterations,
        improvements,
        best_cost = current_cost,
        cost_reduction_pct,
        "tour planning finished"
    );

    Ok(TourPlan {
        tour: tour.iter().map(|&i| nodes[i].id.clone()).collect(),
        routes: evaluator.tour_routes(&tour, vehicle.capacity),
        initial_cost,
        best_cost: current_cost,
        cost_reduction_pct,
        iterations,
        improvements,
        cancelled,
    })
}

/// Builds the feasible edge set for `vehicle` and plans a tour over it.
///
/// The generator is seeded from `params.seed`.
pub fn plan_route(
    nodes: &[Node],
    vehicle: &Vehicle,
    params: &RoutePlanningParams,
    time_windows: &[TimeWindow],
    cancel: Option<Arc<AtomicBool>>,
) -> Result<TourPlan, OptimError> {
    let routes = build_feasible_routes(nodes, vehicle, params)?;
    let mut rng = rng_from_seed(params.seed);
    plan_tour(nodes, &routes, vehicle, params, time_windows, &mut rng, cancel)
}
