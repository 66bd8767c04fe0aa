//! Per-edge feasibility, travel time, and cost for one vehicle class.

use tracing::debug;

use crate::distance::haversine_distance;
use crate::error::OptimError;
use crate::models::{Node, Route, TransportMode, Vehicle};
use crate::planning::RoutePlanningParams;

/// Highest emissions class admitted into an environmental zone.
pub const MAX_ZONE_EMISSIONS_CLASS: u8 = 3;

fn limit_exceeded(limit: Option<f64>, value: f64) -> bool {
    matches!(limit, Some(l) if l > 0.0 && value > l)
}

/// Returns `true` if `vehicle` may travel from `_from` into `to`.
///
/// Only the destination's restrictions apply. Any single violation
/// excludes the edge; permit-required nodes always reject since permits
/// are not tracked.
///
/// # Examples
///
/// ```
/// use sc_optim::evaluation::is_edge_feasible;
/// use sc_optim::models::{Node, NodeKind, NodeMetadata, Restrictions, Vehicle};
///
/// let low_bridge = Node::new("b", NodeKind::Customer, 0.0, 1.0).with_metadata(NodeMetadata {
///     restrictions: Some(Restrictions { height_limit: Some(3.5), ..Default::default() }),
///     ..Default::default()
/// });
/// let depot = Node::new("d", NodeKind::Depot, 0.0, 0.0);
/// let van = Vehicle::new("van", 50.0).with_dimensions(2.5, 2.0, 3.0);
/// let truck = Vehicle::new("truck", 200.0).with_dimensions(4.2, 2.5, 18.0);
/// assert!(is_edge_feasible(&depot, &low_bridge, &van));
/// assert!(!is_edge_feasible(&depot, &low_bridge, &truck));
/// ```
pub fn is_edge_feasible(_from: &Node, to: &Node, vehicle: &Vehicle) -> bool {
    let Some(r) = to.restrictions() else {
        return true;
    };

    if limit_exceeded(r.height_limit, vehicle.height)
        || limit_exceeded(r.weight_limit, vehicle.weight)
        || limit_exceeded(r.width_limit, vehicle.width)
    {
        return false;
    }
    if r.environmental_zone && vehicle.emissions_class > MAX_ZONE_EMISSIONS_CLASS {
        return false;
    }
    !r.permit_required
}

/// Travel time in minutes from `from` to `to`.
///
/// Speed follows the route type; with traffic enabled it is divided by the
/// origin's traffic factor.
pub fn travel_time_minutes(from: &Node, to: &Node, params: &RoutePlanningParams) -> f64 {
    let distance = haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude);
    let mut speed = params.route_type.base_speed_kmh();
    if params.consider_traffic {
        speed /= from.traffic_factor();
    }
    distance / speed * 60.0
}

/// Trip cost: distance charge, tolls at both endpoints unless avoided,
/// and time charge.
pub fn edge_cost(from: &Node, to: &Node, vehicle: &Vehicle, params: &RoutePlanningParams) -> f64 {
    let distance = haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude);
    let mut cost = distance * vehicle.cost_per_km;
    if !params.avoid_tolls {
        cost += from.toll_cost() + to.toll_cost();
    }
    let hours = travel_time_minutes(from, to, params) / 60.0;
    cost + hours * vehicle.cost_per_hour
}

/// Builds every feasible directed road edge between distinct nodes.
///
/// Edge ids are `"{from}->{to}"`; volumes start at zero. Fails on an
/// invalid vehicle, node, or parameter set, so every edge cost is finite
/// and non-negative.
pub fn build_feasible_routes(
    nodes: &[Node],
    vehicle: &Vehicle,
    params: &RoutePlanningParams,
) -> Result<Vec<Route>, OptimError> {
    params.validate()?;
    vehicle.validate()?;
    for node in nodes {
        node.validate()?;
    }

    let mut routes = Vec::new();
    let mut rejected = 0usize;

    for from in nodes {
        for to in nodes {
            if from.id == to.id {
                continue;
            }
            if !is_edge_feasible(from, to, vehicle) {
                rejected += 1;
                continue;
            }
            routes.push(
                Route::new(format!("{}->{}", from.id, to.id), &from.id, &to.id)
                    .with_cost(edge_cost(from, to, vehicle, params))
                    .with_transit_time(travel_time_minutes(from, to, params))
                    .with_mode(TransportMode::Road),
            );
        }
    }

    debug!(
        feasible = routes.len(),
        rejected,
        vehicle = %vehicle.id,
        "built feasible edge set"
    );
    Ok(routes)
}
