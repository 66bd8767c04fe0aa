//! Facility location by center of gravity.
//!
//! - [`weighted_mean`] / [`weighted_median`] — classic COG estimators
//! - [`weiszfeld_median`] — opt-in true geometric median
//! - [`cluster_demand_points`] — density clustering, one facility per cluster
//! - [`refine_location`] — multi-start compass search around the mean

mod centroid;
mod cluster;
mod refine;

pub use centroid::{
    location_metrics, total_weighted_distance, weighted_mean, weighted_median, weiszfeld_median,
    LocationMetrics, COST_PER_KM_UNIT,
};
pub use cluster::{
    cluster_demand_points, cluster_indices, optimize_cluster_locations, DEFAULT_EPSILON_KM,
    DEFAULT_MIN_POINTS,
};
pub use refine::{refine_location, RefineConfig, RefinedLocation, MAX_OFFSET_DEG};
