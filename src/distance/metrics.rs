//! Point-to-point distance formulas over latitude/longitude degrees.
//!
//! All results are in kilometres. Only [`haversine_distance`] is exact on
//! the sphere; the two approximations convert degree deltas at a flat
//! 111 km per degree and are meant for short ranges.

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude used by the planar approximations.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Great-circle distance between two points.
///
/// # Examples
///
/// ```
/// use sc_optim::distance::haversine_distance;
///
/// // One degree of longitude on the equator.
/// let d = haversine_distance(0.0, 0.0, 0.0, 1.0);
/// assert!((d - 111.19).abs() < 0.01);
/// assert_eq!(haversine_distance(1.0, 2.0, 1.0, 2.0), 0.0);
/// ```
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Planar distance with longitude scaled by the cosine of the mean latitude.
pub fn euclidean_distance_approx(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat_km = (lat2 - lat1) * KM_PER_DEGREE;
    let lon_km = (lon2 - lon1) * KM_PER_DEGREE * ((lat1 + lat2) / 2.0).to_radians().cos();
    (lat_km * lat_km + lon_km * lon_km).sqrt()
}

/// Sum of absolute degree deltas at 111 km per degree, no latitude correction.
pub fn manhattan_distance_approx(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    (lat1 - lat2).abs() * KM_PER_DEGREE + (lon1 - lon2).abs() * KM_PER_DEGREE
}

/// Distance formula selector shared by all consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMethod {
    #[default]
    #[serde(alias = "great-circle")]
    Haversine,
    Euclidean,
    Manhattan,
}

impl DistanceMethod {
    /// Distance in kilometres between two coordinate pairs.
    pub fn between(self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        match self {
            DistanceMethod::Haversine => haversine_distance(lat1, lon1, lat2, lon2),
            DistanceMethod::Euclidean => euclidean_distance_approx(lat1, lon1, lat2, lon2),
            DistanceMethod::Manhattan => manhattan_distance_approx(lat1, lon1, lat2, lon2),
        }
    }

    /// Distance in kilometres between two points.
    pub fn distance(self, a: GeoPoint, b: GeoPoint) -> f64 {
        self.between(a.latitude, a.longitude, b.latitude, b.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_symmetric() {
        let ab = haversine_distance(-1.29, 36.82, -4.04, 39.67);
        let ba = haversine_distance(-4.04, 39.67, -1.29, 36.82);
        assert!((ab - ba).abs() < 1e-9);
        // Nairobi to Mombasa is roughly 440 km in a straight line.
        assert!(ab > 400.0 && ab < 480.0, "got {ab}");
    }

    #[test]
    fn test_haversine_antipodal() {
        let d = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_euclidean_on_equator_matches_degree_scale() {
        let d = euclidean_distance_approx(0.0, 0.0, 0.0, 2.0);
        assert!((d - 222.0).abs() < 1e-9);
    }

    #[test]
    fn test_euclidean_shrinks_longitude_at_latitude() {
        let equator = euclidean_distance_approx(0.0, 0.0, 0.0, 1.0);
        let north = euclidean_distance_approx(60.0, 0.0, 60.0, 1.0);
        assert!((north - equator * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_manhattan_has_no_latitude_correction() {
        let d = manhattan_distance_approx(60.0, 0.0, 61.0, 1.0);
        assert!((d - 222.0).abs() < 1e-9);
    }

    #[test]
    fn test_method_dispatch() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert!((DistanceMethod::Manhattan.distance(a, b) - 777.0).abs() < 1e-9);
        assert_eq!(
            DistanceMethod::Haversine.distance(a, b),
            haversine_distance(0.0, 0.0, 3.0, 4.0)
        );
        assert_eq!(DistanceMethod::default(), DistanceMethod::Haversine);
    }
}
