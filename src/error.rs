//! Error type shared by all optimizers.

use thiserror::Error;

/// Errors returned by the optimization entry points.
///
/// Degenerate but well-formed inputs (an empty node list, a route set with
/// nothing to improve) produce neutral results instead of errors; these
/// variants cover malformed input and invalid configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimError {
    #[error("no {0} supplied")]
    EmptyInput(&'static str),

    #[error("invalid node {id}: {reason}")]
    InvalidNode { id: String, reason: String },

    #[error("invalid route {id}: {reason}")]
    InvalidRoute { id: String, reason: String },

    #[error("invalid vehicle {id}: {reason}")]
    InvalidVehicle { id: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
