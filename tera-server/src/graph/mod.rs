//! Adjacency-list graph of teras.
//!
//! The graph is built once per data refresh from the tera and route lists
//! and then shared read-only between concurrent searches.

mod builder;
mod snapshot;

use std::collections::HashMap;

use crate::domain::TeraId;

pub use builder::{BuildWarning, GraphBuild, WeightField, build, build_with_report};
pub use snapshot::{GraphSnapshot, GraphStore};

/// A directed edge to a neighboring tera.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: TeraId,
    /// Fare for the hop. Finite and non-negative.
    pub fare: f64,
    /// Travel time for the hop in minutes. Finite and non-negative.
    pub time: f64,
}

impl Edge {
    pub fn new(to: TeraId, fare: f64, time: f64) -> Self {
        Self { to, fare, time }
    }
}

/// Tera adjacency list.
///
/// Every node has at most one outgoing edge per neighbor. Outgoing edges
/// keep the order in which the builder first saw them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    adjacency: HashMap<TeraId, Vec<Edge>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `id` is a node of the graph.
    pub fn contains(&self, id: &TeraId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Outgoing edges of `id`; empty for unknown nodes.
    pub fn edges_from(&self, id: &TeraId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The edge `from → to`, if present.
    pub fn edge(&self, from: &TeraId, to: &TeraId) -> Option<&Edge> {
        self.edges_from(from).iter().find(|e| &e.to == to)
    }

    /// All node ids, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &TeraId> {
        self.adjacency.keys()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Add a node with no edges. No-op if it already exists.
    pub(crate) fn ensure_node(&mut self, id: &TeraId) {
        if !self.adjacency.contains_key(id) {
            self.adjacency.insert(id.clone(), Vec::new());
        }
    }

    /// Add `from → edge.to` unless `from` already has an edge to that
    /// neighbor. Returns whether the edge was added.
    pub(crate) fn add_edge(&mut self, from: &TeraId, edge: Edge) -> bool {
        let edges = self.adjacency.entry(from.clone()).or_default();
        if edges.iter().any(|e| e.to == edge.to) {
            return false;
        }
        edges.push(edge);
        true
    }
}
