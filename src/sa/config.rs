//! SA configuration, cooling schedules, and acceptance functions.

use serde::{Deserialize, Serialize};

use crate::error::OptimError;

/// Temperature floor applied before dividing by the temperature.
pub const MIN_TEMPERATURE: f64 = 1e-10;

/// Cooling schedule. `t` is the zero-based iteration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoolingSchedule {
    /// `T = T0 · (1 − t / iterations)`.
    Linear,
    /// `T ← T · cooling_rate` every step.
    #[default]
    Exponential,
    /// `T = T0 / (1 + ln(1 + t))`.
    Logarithmic,
}

impl CoolingSchedule {
    /// Temperature after iteration `t`.
    pub fn next(self, temperature: f64, t: usize, config: &SaConfig) -> f64 {
        match self {
            CoolingSchedule::Linear => {
                let total = config.iterations.max(1) as f64;
                config.initial_temperature * (1.0 - t as f64 / total)
            }
            CoolingSchedule::Exponential => temperature * config.cooling_rate,
            CoolingSchedule::Logarithmic => {
                config.initial_temperature / (1.0 + (1.0 + t as f64).ln())
            }
        }
    }
}

/// Probability of accepting a move with signed gain `delta` (positive is
/// better) at `temperature`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptanceFunction {
    /// `exp(delta / T)`.
    #[default]
    Metropolis,
    /// `1 / (1 + exp(−delta / T))`.
    Glauber,
}

impl AcceptanceFunction {
    pub fn probability(self, delta: f64, temperature: f64) -> f64 {
        let t = temperature.max(MIN_TEMPERATURE);
        match self {
            AcceptanceFunction::Metropolis => (delta / t).exp(),
            AcceptanceFunction::Glauber => 1.0 / (1.0 + (-delta / t).exp()),
        }
    }
}

/// Configuration for [`SaRunner`](super::SaRunner).
///
/// # Examples
///
/// ```
/// use sc_optim::sa::{AcceptanceFunction, CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_cooling(CoolingSchedule::Logarithmic)
///     .with_acceptance(AcceptanceFunction::Glauber)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaConfig {
    pub initial_temperature: f64,
    /// Per-step factor for exponential cooling, in (0, 1].
    pub cooling_rate: f64,
    /// Fixed iteration budget.
    pub iterations: usize,
    #[serde(alias = "coolingSchedule")]
    pub cooling: CoolingSchedule,
    #[serde(alias = "acceptanceFunction")]
    pub acceptance: AcceptanceFunction,
    /// Percentage of routes considered for perturbation per neighbor.
    pub neighborhood_size: f64,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.95,
            iterations: 1000,
            cooling: CoolingSchedule::Exponential,
            acceptance: AcceptanceFunction::Metropolis,
            neighborhood_size: 20.0,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_acceptance(mut self, acceptance: AcceptanceFunction) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_neighborhood_size(mut self, percent: f64) -> Self {
        self.neighborhood_size = percent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), OptimError> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(OptimError::InvalidConfig(
                "initial_temperature must be positive".into(),
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(OptimError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        if !(self.neighborhood_size > 0.0 && self.neighborhood_size <= 100.0) {
            return Err(OptimError::InvalidConfig(format!(
                "neighborhood_size must be in (0, 100], got {}",
                self.neighborhood_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SaConfig::default();
        assert_eq!(c.initial_temperature, 1000.0);
        assert_eq!(c.cooling_rate, 0.95);
        assert_eq!(c.iterations, 1000);
        assert_eq!(c.neighborhood_size, 20.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(SaConfig::default().with_initial_temperature(0.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(1.5).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(f64::NAN).validate().is_err());
        assert!(SaConfig::default().with_neighborhood_size(0.0).validate().is_err());
        assert!(SaConfig::default().with_neighborhood_size(150.0).validate().is_err());
    }

    #[test]
    fn test_cooling_schedules() {
        let c = SaConfig::default().with_iterations(100);
        assert!((CoolingSchedule::Exponential.next(100.0, 0, &c) - 95.0).abs() < 1e-9);
        assert!((CoolingSchedule::Linear.next(0.0, 50, &c) - 500.0).abs() < 1e-9);
        assert!((CoolingSchedule::Logarithmic.next(0.0, 0, &c) - 1000.0).abs() < 1e-9);
        let t = CoolingSchedule::Logarithmic.next(0.0, 9, &c);
        assert!((t - 1000.0 / (1.0 + 10f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_acceptance_probabilities() {
        let m = AcceptanceFunction::Metropolis;
        let g = AcceptanceFunction::Glauber;
        assert!((m.probability(0.0, 10.0) - 1.0).abs() < 1e-12);
        assert!((m.probability(-10.0, 10.0) - (-1f64).exp()).abs() < 1e-12);
        assert!((g.probability(0.0, 10.0) - 0.5).abs() < 1e-12);
        assert!(g.probability(-1e6, 1.0) < 1e-12);
        // Zero temperature is floored, never NaN.
        assert!(m.probability(-1.0, 0.0).is_finite());
        assert!(g.probability(-1.0, 0.0).is_finite());
    }

    #[test]
    fn test_deserialize_host_names() {
        let c: SaConfig = serde_json::from_str(
            r#"{"initialTemperature":200,"coolingSchedule":"linear","acceptanceFunction":"glauber"}"#,
        )
        .expect("valid");
        assert_eq!(c.initial_temperature, 200.0);
        assert_eq!(c.cooling, CoolingSchedule::Linear);
        assert_eq!(c.acceptance, AcceptanceFunction::Glauber);
        assert_eq!(c.iterations, 1000);
    }
}
