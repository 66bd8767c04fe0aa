//! Objectives for weighted-sum fitness.

use serde::{Deserialize, Serialize};

use crate::error::OptimError;

/// A raw flow metric that an objective can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectiveMetric {
    /// Σ volume · unit cost.
    Cost,
    /// Σ volume.
    Volume,
    /// Σ transit time · volume.
    TransitTime,
    /// Largest single-route volume.
    MaxVolume,
    /// Evenness of volume across routes, 0–100.
    FlowBalance,
}

impl ObjectiveMetric {
    /// Key used in the fitness map.
    pub fn key(self) -> &'static str {
        match self {
            ObjectiveMetric::Cost => "cost",
            ObjectiveMetric::Volume => "volume",
            ObjectiveMetric::TransitTime => "transitTime",
            ObjectiveMetric::MaxVolume => "maxVolume",
            ObjectiveMetric::FlowBalance => "flowBalance",
        }
    }
}

/// One weighted term of the fitness sum.
///
/// Minimized metrics enter the sum as `100000 / (1 + value)`, maximized
/// metrics as-is.
///
/// # Examples
///
/// ```
/// use sc_optim::fitness::{Objective, ObjectiveMetric};
///
/// let o: Objective = serde_json::from_str(
///     r#"{"name":"cost","weight":0.7,"minimize":true}"#,
/// ).unwrap();
/// assert_eq!(o.name, ObjectiveMetric::Cost);
/// assert!((o.normalize(9.0) - 10000.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub name: ObjectiveMetric,
    pub weight: f64,
    pub minimize: bool,
}

impl Objective {
    pub fn new(name: ObjectiveMetric, weight: f64, minimize: bool) -> Self {
        Self {
            name,
            weight,
            minimize,
        }
    }

    /// Maps a raw metric value onto the higher-is-better scale.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.minimize {
            100_000.0 / (1.0 + value)
        } else {
            value
        }
    }

    pub fn validate(&self) -> Result<(), OptimError> {
        if !self.weight.is_finite() {
            return Err(OptimError::InvalidConfig(format!(
                "objective {} has non-finite weight",
                self.name.key()
            )));
        }
        Ok(())
    }
}
