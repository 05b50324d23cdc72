//! Graph construction from tera and route records.
//!
//! Every route is treated as bidirectional: taxi fares don't depend on the
//! direction of travel, so each approved route yields a forward and a
//! reverse edge with the same weights.

use std::fmt;

use tracing::{debug, warn};

use crate::domain::{RouteRecord, Tera, TeraId, WeightIssue};

use super::{Edge, Graph};

/// Which weight of a route was coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightField {
    Fare,
    Time,
}

impl fmt::Display for WeightField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightField::Fare => f.write_str("fare"),
            WeightField::Time => f.write_str("time"),
        }
    }
}

/// A route weight that was replaced by zero during the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildWarning {
    pub from: TeraId,
    pub to: TeraId,
    pub field: WeightField,
    pub issue: WeightIssue,
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "route {} - {}: {} is {}, using 0",
            self.from, self.to, self.field, self.issue
        )
    }
}

/// Output of a graph build.
#[derive(Debug, Clone, Default)]
pub struct GraphBuild {
    /// The adjacency list.
    pub graph: Graph,

    /// Number of approved routes that went into the graph.
    pub routes_used: usize,

    /// Weights that had to be zeroed.
    pub warnings: Vec<BuildWarning>,
}

/// Build the adjacency list for `teras` connected by `routes`.
///
/// See [`build_with_report`] for the rules; this variant drops the report.
pub fn build(routes: &[RouteRecord], teras: &[Tera]) -> Graph {
    build_with_report(routes, teras).graph
}

/// Build the adjacency list and report coerced weights.
///
/// - Every tera becomes a node, even without routes.
/// - Only approved routes contribute edges. Endpoints missing from `teras`
///   are added as nodes.
/// - Each route adds `from → to` and `to → from` with identical weights,
///   unless an edge to that neighbor already exists (first record wins).
/// - Unusable fares and times become zero and produce a [`BuildWarning`].
///
/// Never fails.
pub fn build_with_report(routes: &[RouteRecord], teras: &[Tera]) -> GraphBuild {
    let mut graph = Graph::new();
    let mut warnings = Vec::new();
    let mut routes_used = 0;

    for tera in teras {
        graph.ensure_node(&tera.id);
    }

    for route in routes.iter().filter(|r| r.is_approved()) {
        routes_used += 1;

        let fare = route.fare();
        let time = route.estimated_time();
        for (field, issue) in [(WeightField::Fare, fare.issue), (WeightField::Time, time.issue)] {
            if let Some(issue) = issue {
                let warning = BuildWarning {
                    from: route.from.clone(),
                    to: route.to.clone(),
                    field,
                    issue,
                };
                warn!(%warning, "coerced route weight");
                warnings.push(warning);
            }
        }

        graph.ensure_node(&route.from);
        graph.ensure_node(&route.to);
        graph.add_edge(&route.from, Edge::new(route.to.clone(), fare.value, time.value));
        graph.add_edge(&route.to, Edge::new(route.from.clone(), fare.value, time.value));
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        routes = routes_used,
        skipped = routes.len() - routes_used,
        warnings = warnings.len(),
        "graph built"
    );

    GraphBuild {
        graph,
        routes_used,
        warnings,
    }
}
