//! Route search entry point.
//!
//! Dispatches on the optimization mode: weighted modes run Dijkstra and then
//! the edge-blocking alternative search; stops mode ranks every minimum-hop
//! path and takes the top two.

use tracing::debug;

use crate::domain::TeraId;
use crate::graph::Graph;

use super::alternative::second_best;
use super::config::SearchConfig;
use super::dijkstra::shortest_path;
use super::mode::{Metric, OptimizeBy};
use super::path::PathResult;
use super::stops::fewest_stops;

/// Route finder over one graph snapshot.
///
/// Holds only shared references; any number of planners may search the
/// same graph at once.
pub struct Planner<'a> {
    graph: &'a Graph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a Graph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Find the best route from `source` to `target`, plus a second-best.
    ///
    /// Unknown endpoints and disconnected pairs give an empty result rather
    /// than an error. When `source == target` the result is the single-node
    /// path with zero totals.
    pub fn find_path(&self, source: &TeraId, target: &TeraId, mode: OptimizeBy) -> PathResult {
        if !self.graph.contains(source) || !self.graph.contains(target) {
            debug!(%source, %target, "unknown endpoint");
            return PathResult::not_found();
        }
        if source == target {
            return PathResult::trivial(source.clone());
        }

        let result = match mode.metric() {
            Some(metric) => self.weighted(source, target, metric),
            None => self.fewest_stops(source, target),
        };

        debug!(
            %source,
            %target,
            %mode,
            found = result.is_found(),
            hops = result.best().map(|b| b.hops()),
            alternative = result.second_best().is_some(),
            "route search complete"
        );

        result
    }

    fn weighted(&self, source: &TeraId, target: &TeraId, metric: Metric) -> PathResult {
        let Some(best) = shortest_path(self.graph, source, target, metric, None) else {
            return PathResult::not_found();
        };
        let alternative = second_best(self.graph, &best, metric);
        PathResult::found(best, alternative)
    }

    fn fewest_stops(&self, source: &TeraId, target: &TeraId) -> PathResult {
        let mut ranked =
            fewest_stops(self.graph, source, target, self.config.max_stop_paths).into_iter();
        match ranked.next() {
            Some(best) => PathResult::found(best, ranked.next()),
            None => PathResult::not_found(),
        }
    }
}

/// Search `graph` with the default configuration.
pub fn find_path(graph: &Graph, source: &TeraId, target: &TeraId, mode: OptimizeBy) -> PathResult {
    Planner::new(graph, &SearchConfig::default()).find_path(source, target, mode)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
