//! Tera route planner server.
//!
//! A web service that answers: "Which minibus taxis do I take to get from
//! this tera to that one, cheapest, fastest, or with the fewest changes?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod teras;
pub mod web;
