//! GA configuration.

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::error::OptimError;

/// Configuration for [`GaRunner`](super::GaRunner).
///
/// # Examples
///
/// ```
/// use sc_optim::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_selection(Selection::Rank)
///     .with_seed(1);
/// assert!(config.validate().is_ok());
/// assert_eq!(GaConfig::default().effective_tournament_size(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GaConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Probability that a parent pair is blended rather than copied.
    pub crossover_rate: f64,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Best individuals carried over unchanged; at least 1.
    pub elitism_count: usize,
    #[serde(alias = "selectionMethod")]
    pub selection: Selection,
    /// Tournament size; defaults to 10% of the population, minimum 2.
    pub tournament_size: Option<usize>,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elitism_count: 2,
            selection: Selection::Tournament,
            tournament_size: None,
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the tournament size and switches to tournament selection.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = Some(k);
        self.selection = Selection::Tournament;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Tournament size actually used.
    pub fn effective_tournament_size(&self) -> usize {
        self.tournament_size
            .unwrap_or_else(|| (self.population_size / 10).max(2))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), OptimError> {
        if self.population_size < 2 {
            return Err(OptimError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.elitism_count == 0 {
            return Err(OptimError::InvalidConfig(
                "elitism_count must be at least 1".into(),
            ));
        }
        if self.elitism_count >= self.population_size {
            return Err(OptimError::InvalidConfig(format!(
                "elitism_count {} must be below population_size {}",
                self.elitism_count, self.population_size
            )));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(OptimError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {rate}"
                )));
            }
        }
        if self.tournament_size == Some(0) {
            return Err(OptimError::InvalidConfig(
                "tournament_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = GaConfig::default();
        assert_eq!(c.population_size, 50);
        assert_eq!(c.generations, 100);
        assert_eq!(c.elitism_count, 2);
        assert_eq!(c.selection, Selection::Tournament);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_tournament_size_default_floor() {
        let c = GaConfig::default().with_population_size(12);
        assert_eq!(c.effective_tournament_size(), 2);
        let c = GaConfig::default().with_population_size(200);
        assert_eq!(c.effective_tournament_size(), 20);
        assert_eq!(c.with_tournament_size(7).effective_tournament_size(), 7);
    }

    #[test]
    fn test_validate_elitism() {
        assert!(GaConfig::default().with_elitism_count(0).validate().is_err());
        let c = GaConfig::default()
            .with_population_size(4)
            .with_elitism_count(4);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rates() {
        assert!(GaConfig::default().with_crossover_rate(1.2).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(-0.1).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(f64::NAN).validate().is_err());
        assert!(GaConfig::default().with_tournament_size(0).validate().is_err());
    }

    #[test]
    fn test_deserialize_host_names() {
        let c: GaConfig =
            serde_json::from_str(r#"{"populationSize":20,"selectionMethod":"roulette"}"#)
                .expect("valid");
        assert_eq!(c.population_size, 20);
        assert_eq!(c.selection, Selection::Roulette);
        assert_eq!(c.crossover_rate, 0.8);
    }
}
