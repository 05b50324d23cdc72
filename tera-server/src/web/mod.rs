//! Web layer for the tera route planner.
//!
//! Provides HTTP endpoints for route search, tera lookup and graph refresh.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
