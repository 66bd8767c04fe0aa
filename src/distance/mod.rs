//! Geographic distance formulas and distance matrices.
//!
//! Provides haversine, planar-approximate Euclidean, and Manhattan distance
//! over latitude/longitude, selectable through [`DistanceMethod`].

mod matrix;
mod metrics;

pub use matrix::DistanceMatrix;
pub use metrics::{
    euclidean_distance_approx, haversine_distance, manhattan_distance_approx, DistanceMethod,
    EARTH_RADIUS_KM, KM_PER_DEGREE,
};
