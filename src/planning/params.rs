//! Route planning parameters.

use serde::{Deserialize, Serialize};

use crate::error::OptimError;

/// Routing preference; selects the assumed cruising speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    /// Highway preference, 90 km/h.
    Fastest,
    /// Direct roads, 60 km/h.
    Shortest,
    /// 75 km/h.
    #[default]
    Balanced,
}

impl RouteType {
    /// Base speed in km/h.
    pub fn base_speed_kmh(self) -> f64 {
        match self {
            RouteType::Fastest => 90.0,
            RouteType::Shortest => 60.0,
            RouteType::Balanced => 75.0,
        }
    }
}

/// Vehicle category requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    #[default]
    Truck,
    Van,
}

/// Parameters for a single-vehicle tour planning run.
///
/// `avoid_highways` and `vehicle_type` are accepted for interface
/// compatibility but do not change the straight-line edge model.
///
/// # Examples
///
/// ```
/// use sc_optim::planning::{RoutePlanningParams, RouteType};
///
/// let params = RoutePlanningParams::default()
///     .with_route_type(RouteType::Fastest)
///     .with_traffic(true)
///     .with_time_windows(true);
/// assert_eq!(params.max_iterations, 1000);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutePlanningParams {
    pub route_type: RouteType,
    pub consider_traffic: bool,
    pub avoid_tolls: bool,
    pub avoid_highways: bool,
    pub vehicle_type: VehicleType,
    pub consider_time_windows: bool,
    /// Local search iterations.
    pub max_iterations: usize,
    /// Fixed service time per stop, in minutes.
    pub service_time_minutes: f64,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for RoutePlanningParams {
    fn default() -> Self {
        Self {
            route_type: RouteType::Balanced,
            consider_traffic: false,
            avoid_tolls: false,
            avoid_highways: false,
            vehicle_type: VehicleType::Truck,
            consider_time_windows: false,
            max_iterations: 1000,
            service_time_minutes: 10.0,
            seed: None,
        }
    }
}

impl RoutePlanningParams {
    pub fn with_route_type(mut self, route_type: RouteType) -> Self {
        self.route_type = route_type;
        self
    }

    pub fn with_traffic(mut self, enabled: bool) -> Self {
        self.consider_traffic = enabled;
        self
    }

    pub fn with_avoid_tolls(mut self, enabled: bool) -> Self {
        self.avoid_tolls = enabled;
        self
    }

    pub fn with_time_windows(mut self, enabled: bool) -> Self {
        self.consider_time_windows = enabled;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_service_time(mut self, minutes: f64) -> Self {
        self.service_time_minutes = minutes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), OptimError> {
        if !self.service_time_minutes.is_finite() || self.service_time_minutes < 0.0 {
            return Err(OptimError::InvalidConfig(format!(
                "service_time_minutes must be finite and non-negative, got {}",
                self.service_time_minutes
            )));
        }
        Ok(())
    }
}
