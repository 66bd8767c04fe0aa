//! Vehicle with capacity, cost rates, and physical dimensions.

use serde::{Deserialize, Serialize};

use crate::error::OptimError;

/// A vehicle class used for a tour planning run.
///
/// # Examples
///
/// ```
/// use sc_optim::models::Vehicle;
///
/// let v = Vehicle::new("truck", 200.0)
///     .with_cost_per_km(1.2)
///     .with_dimensions(4.0, 2.5, 12.0);
/// assert_eq!(v.capacity, 200.0);
/// assert_eq!(v.height, 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub capacity: f64,
    pub cost_per_km: f64,
    pub cost_per_hour: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub weight: f64,
    /// Emissions class; zones flagged environmental admit classes up to 3.
    #[serde(rename = "emissions", default)]
    pub emissions_class: u8,
}

impl Vehicle {
    /// Creates a vehicle with the given capacity.
    ///
    /// Default: cost_per_km = 1.0, no hourly cost, zero dimensions,
    /// emissions class 0.
    pub fn new(id: impl Into<String>, capacity: f64) -> Self {
        Self {
            id: id.into(),
            capacity,
            cost_per_km: 1.0,
            cost_per_hour: 0.0,
            height: 0.0,
            width: 0.0,
            weight: 0.0,
            emissions_class: 0,
        }
    }

    pub fn with_cost_per_km(mut self, cost: f64) -> Self {
        self.cost_per_km = cost;
        self
    }

    pub fn with_cost_per_hour(mut self, cost: f64) -> Self {
        self.cost_per_hour = cost;
        self
    }

    /// Sets height, width, and gross weight.
    pub fn with_dimensions(mut self, height: f64, width: f64, weight: f64) -> Self {
        self.height = height;
        self.width = width;
        self.weight = weight;
        self
    }

    pub fn with_emissions_class(mut self, class: u8) -> Self {
        self.emissions_class = class;
        self
    }

    /// Checks that capacity, cost rates, and dimensions are finite and
    /// non-negative.
    pub fn validate(&self) -> Result<(), OptimError> {
        let fields = [
            ("capacity", self.capacity),
            ("cost_per_km", self.cost_per_km),
            ("cost_per_hour", self.cost_per_hour),
            ("height", self.height),
            ("width", self.width),
            ("weight", self.weight),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(OptimError::InvalidVehicle {
                    id: self.id.clone(),
                    reason: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new("v", 100.0);
        assert_eq!(v.capacity, 100.0);
        assert_eq!(v.cost_per_km, 1.0);
        assert_eq!(v.cost_per_hour, 0.0);
        assert_eq!(v.emissions_class, 0);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_vehicle_builder() {
        let v = Vehicle::new("v", 100.0)
            .with_cost_per_km(1.5)
            .with_cost_per_hour(30.0)
            .with_dimensions(3.5, 2.4, 7.5)
            .with_emissions_class(5);
        assert_eq!(v.cost_per_km, 1.5);
        assert_eq!(v.cost_per_hour, 30.0);
        assert_eq!(v.width, 2.4);
        assert_eq!(v.emissions_class, 5);
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let negative = Vehicle::new("v", 100.0).with_cost_per_km(-2.0);
        assert!(matches!(
            negative.validate(),
            Err(OptimError::InvalidVehicle { ref reason, .. }) if reason.starts_with("cost_per_km")
        ));

        let nan = Vehicle::new("v", f64::NAN);
        assert!(matches!(nan.validate(), Err(OptimError::InvalidVehicle { .. })));

        let tall = Vehicle::new("v", 100.0).with_dimensions(f64::INFINITY, 2.0, 3.0);
        assert!(tall.validate().is_err());
    }
}
