//! Simulated Annealing over route volumes.
//!
//! A single-solution trajectory search that accepts worsening moves with
//! a probability shrinking as the temperature cools, so it can escape
//! local optima. Only flow volumes are searched; the route set is fixed.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Glauber (1963), "Time-dependent statistics of the Ising model"

mod config;
mod runner;

pub use config::{AcceptanceFunction, CoolingSchedule, SaConfig, MIN_TEMPERATURE};
pub use runner::{SaResult, SaRunner};
