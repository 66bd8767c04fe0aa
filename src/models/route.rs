//! Directed route (edge) between two network nodes.

use serde::{Deserialize, Serialize};

use crate::error::OptimError;

/// Transport mode of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Road,
    Rail,
    Air,
    Sea,
}

impl TransportMode {
    /// Cost per km relative to road.
    pub fn cost_factor(self) -> f64 {
        match self {
            TransportMode::Road => 1.0,
            TransportMode::Rail => 0.8,
            TransportMode::Air => 5.0,
            TransportMode::Sea => 0.5,
        }
    }

    /// Transit minutes per km.
    pub fn time_factor(self) -> f64 {
        match self {
            TransportMode::Road => 1.0,
            TransportMode::Rail => 1.5,
            TransportMode::Air => 0.5,
            TransportMode::Sea => 4.0,
        }
    }
}

/// A directed edge carrying a flow volume between two nodes.
///
/// `cost` is a per-unit cost for flow optimization and a per-trip cost for
/// tour planning and path finding. `transit_time` is in minutes.
///
/// # Examples
///
/// ```
/// use sc_optim::models::{Route, TransportMode};
///
/// let r = Route::new("r1", "a", "b").with_cost(12.0).with_volume(40.0);
/// assert_eq!(r.mode, TransportMode::Road);
/// assert_eq!(r.flow_cost(), 480.0);
/// assert!(!r.is_optimized);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub transit_time: f64,
    #[serde(rename = "type", default)]
    pub mode: TransportMode,
    #[serde(default)]
    pub is_optimized: bool,
}

impl Route {
    /// Creates a zero-cost road route.
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            volume: 0.0,
            cost: 0.0,
            transit_time: 0.0,
            mode: TransportMode::Road,
            is_optimized: false,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_transit_time(mut self, minutes: f64) -> Self {
        self.transit_time = minutes;
        self
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }

    /// Volume multiplied by unit cost.
    pub fn flow_cost(&self) -> f64 {
        self.volume * self.cost
    }

    /// Returns a copy carrying `volume` and flagged as optimized.
    pub fn optimized_with_volume(&self, volume: f64) -> Self {
        Self {
            volume,
            is_optimized: true,
            ..self.clone()
        }
    }

    /// Checks the endpoint and numeric invariants.
    pub fn validate(&self) -> Result<(), OptimError> {
        let invalid = |reason: String| OptimError::InvalidRoute {
            id: self.id.clone(),
            reason,
        };
        if self.from == self.to {
            return Err(invalid(format!("self-loop on {}", self.from)));
        }
        for (name, value) in [
            ("volume", self.volume),
            ("cost", self.cost),
            ("transit time", self.transit_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be finite and non-negative, got {value}")));
            }
        }
        Ok(())
    }
}
