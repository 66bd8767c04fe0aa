//! Domain model types for supply-network optimization.
//!
//! Nodes (facilities, customers, hubs) with optional access restrictions,
//! directed routes carrying flow volumes, vehicles, and arrival windows.
//! All types are plain values; optimizers return new collections rather
//! than mutating their inputs.

mod node;
mod point;
mod route;
mod vehicle;

pub use node::{Node, NodeKind, NodeMetadata, Restrictions, TimeWindow};
pub use point::GeoPoint;
pub use route::{Route, TransportMode};
pub use vehicle::Vehicle;
