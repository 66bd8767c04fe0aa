//! Genetic algorithm over route volumes.
//!
//! - [`GaConfig`] — population, rates, elitism, selection
//! - [`Selection`] — tournament, roulette, and rank selection
//! - [`blend_crossover`] / [`mutate_volumes`] — volume-vector operators
//! - [`GaRunner`] — the generational loop

mod config;
mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use operators::{blend_crossover, mutate_volumes, randomize_volumes, MUTATION_SPREAD};
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
