//! # sc-optim
//!
//! Supply-chain network optimization: facility location, single-vehicle
//! tour planning, metaheuristic flow allocation, and multi-modal
//! shortest paths.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Route, Vehicle, TimeWindow)
//! - [`distance`] — Haversine and flat-earth distances, distance matrix
//! - [`facility`] — Centers of gravity, density clustering, multi-start refinement
//! - [`evaluation`] — Edge feasibility/cost model and tour evaluation
//! - [`local_search`] — Tour moves (swap, 2-opt, relocate)
//! - [`planning`] — Route planning parameters and tour improvement
//! - [`fitness`] — Objectives and weighted-sum fitness over route volumes
//! - [`sa`] — Simulated annealing over route volumes
//! - [`ga`] — Genetic algorithm over route volumes
//! - [`network`] — Multi-modal edges, preferred-mode Dijkstra, flow metrics
//!
//! All entry points are synchronous and pure; stochastic ones take an
//! explicit RNG or a seed so runs are reproducible.

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod facility;
pub mod fitness;
pub mod ga;
pub mod local_search;
pub mod models;
pub mod network;
pub mod planning;
pub mod random;
pub mod sa;

pub use error::OptimError;
