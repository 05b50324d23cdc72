//! Second-best route for the weighted modes.
//!
//! Any different route must leave the best path at one of its edges. Blocking
//! each edge of the best path in turn and re-running the search therefore
//! yields the cheapest single-detour alternatives; the cheapest of those that
//! is strictly worse than the best is the second-best.

use std::collections::HashSet;

use tracing::trace;

use crate::graph::Graph;

use super::dijkstra::{BlockedEdge, shortest_path};
use super::mode::Metric;
use super::path::Itinerary;
use super::rank::by_metric;

/// The second-best itinerary relative to `best`, if any.
///
/// Candidates must cost strictly more than `best` under `metric`. Ties are
/// broken by the other metric, then by node sequence.
pub fn second_best(graph: &Graph, best: &Itinerary, metric: Metric) -> Option<Itinerary> {
    let source = best.origin()?;
    let target = best.destination()?;
    let best_cost = metric.primary(best);

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for hop in best.path.windows(2) {
        let blocked = BlockedEdge {
            from: &hop[0],
            to: &hop[1],
        };
        let Some(candidate) = shortest_path(graph, source, target, metric, Some(blocked)) else {
            continue;
        };
        if metric.primary(&candidate) <= best_cost {
            continue;
        }
        if seen.insert(candidate.path.clone()) {
            candidates.push(candidate);
        }
    }

    trace!(
        blocked = best.hops(),
        candidates = candidates.len(),
        "second-best candidates"
    );

    candidates.into_iter().min_by(by_metric(metric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteRecord, TeraId};
    use crate::graph::build;

    fn id(s: &str) -> TeraId {
        TeraId::parse(s).unwrap()
    }

    fn graph(edges: &[(&str, &str, f64, f64)]) -> Graph {
        let routes: Vec<RouteRecord> = edges
            .iter()
            .map(|(a, b, fare, time)| RouteRecord::new(id(a), id(b), *fare, *time))
            .collect();
        build(&routes, &[])
    }

    fn path(ids: &[&str]) -> Vec<TeraId> {
        ids.iter().map(|s| id(s)).collect()
    }

    #[test]
    fn direct_route_is_second_best_in_triangle() {
        let g = graph(&[
            ("x", "y", 10.0, 5.0),
            ("y", "z", 10.0, 5.0),
            ("x", "z", 25.0, 8.0),
        ]);
        let best = Itinerary::new(path(&["x", "y", "z"]), 20.0, 10.0);
        let alt = second_best(&g, &best, Metric::Fare).unwrap();
        assert_eq!(alt.path, path(&["x", "z"]));
        assert_eq!((alt.total_fare, alt.total_time), (25.0, 8.0));
    }

    #[test]
    fn equal_cost_detour_is_not_second_best() {
        // Blocking either edge of a-b-d finds a-c-d at the same fare, which
        // is not strictly worse, so the dearer direct route is never reached.
        let g = graph(&[
            ("a", "b", 1.0, 1.0),
            ("b", "d", 1.0, 1.0),
            ("a", "c", 1.0, 1.0),
            ("c", "d", 1.0, 1.0),
            ("a", "d", 5.0, 1.0),
        ]);
        let best = Itinerary::new(path(&["a", "b", "d"]), 2.0, 2.0);
        assert!(second_best(&g, &best, Metric::Fare).is_none());
    }

    #[test]
    fn no_alternative_on_a_line() {
        let g = graph(&[("a", "b", 1.0, 1.0), ("b", "c", 1.0, 1.0)]);
        let best = Itinerary::new(path(&["a", "b", "c"]), 2.0, 2.0);
        assert!(second_best(&g, &best, Metric::Fare).is_none());
    }

    #[test]
    fn single_node_has_no_alternative() {
        let g = graph(&[("a", "b", 1.0, 1.0)]);
        let best = Itinerary::new(path(&["a"]), 0.0, 0.0);
        assert!(second_best(&g, &best, Metric::Time).is_none());
    }

    #[test]
    fn ties_on_primary_broken_by_secondary() {
        // Blocking a->b gives a-x-b-c (fare 5, time 3); blocking b->c gives
        // a-b-y-c (fare 5, time 9).
        let g = graph(&[
            ("a", "b", 1.0, 1.0),
            ("b", "c", 1.0, 1.0),
            ("a", "x", 2.0, 1.0),
            ("x", "b", 2.0, 1.0),
            ("b", "y", 2.0, 4.0),
            ("y", "c", 2.0, 4.0),
        ]);
        let best = Itinerary::new(path(&["a", "b", "c"]), 2.0, 2.0);
        let alt = second_best(&g, &best, Metric::Fare).unwrap();
        assert_eq!(alt.path, path(&["a", "x", "b", "c"]));
        assert_eq!((alt.total_fare, alt.total_time), (5.0, 3.0));
    }
}
