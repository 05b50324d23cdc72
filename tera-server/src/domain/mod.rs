//! Domain types for the tera route finder.
//!
//! Teras are the graph's nodes and routes are its undirected, weighted
//! edges. Identifiers are validated at construction; route weights are kept
//! raw until the graph builder coerces them.

mod route;
mod tera;

pub use route::{Coerced, RouteRecord, RouteStatus, UnknownStatus, WeightIssue, coerce_weight};
pub use tera::{Coordinate, InvalidTeraId, Tera, TeraId};
