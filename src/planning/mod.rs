//! Single-vehicle route planning.
//!
//! - [`RoutePlanningParams`] — speed profile, toll and traffic options
//! - [`plan_tour`] — hill-climbing tour over a caller-supplied edge set
//! - [`plan_route`] — builds the feasible edge set first, then plans

mod params;
mod tour;

pub use params::{RoutePlanningParams, RouteType, VehicleType};
pub use tour::{plan_route, plan_tour, select_customers, select_depot, TourPlan};
