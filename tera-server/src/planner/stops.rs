//! Fewest-hop search.
//!
//! Breadth-first search that keeps every predecessor reaching a node at its
//! minimum depth, so all minimum-hop paths to the target can be recovered
//! and ranked by fare afterwards.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::domain::TeraId;
use crate::graph::Graph;

use super::path::Itinerary;
use super::rank::cheapest_first;

/// All minimum-hop paths from `source` to `target`, cheapest first.
///
/// At most `max_paths` paths are reconstructed (at least one). Returns an
/// empty list if `target` is unreachable.
pub fn fewest_stops<'g>(
    graph: &'g Graph,
    source: &'g TeraId,
    target: &'g TeraId,
    max_paths: usize,
) -> Vec<Itinerary> {
    let Some(parents) = shortest_hop_parents(graph, source, target) else {
        return Vec::new();
    };

    let mut paths = Vec::new();
    let mut suffix = Vec::new();
    collect_paths(
        target,
        source,
        &parents,
        &mut suffix,
        &mut paths,
        max_paths.max(1),
    );

    let mut itineraries: Vec<Itinerary> = paths
        .into_iter()
        .filter_map(|path| with_totals(graph, path))
        .collect();
    itineraries.sort_by(cheapest_first);

    trace!(
        source = %source,
        target = %target,
        paths = itineraries.len(),
        "fewest-stops paths ranked"
    );

    itineraries
}

type Parents<'g> = HashMap<&'g TeraId, Vec<&'g TeraId>>;

/// BFS from `source`, recording every minimum-depth predecessor.
///
/// Returns `None` if `target` is never reached.
fn shortest_hop_parents<'g>(
    graph: &'g Graph,
    source: &'g TeraId,
    target: &'g TeraId,
) -> Option<Parents<'g>> {
    let mut depth: HashMap<&'g TeraId, usize> = HashMap::new();
    let mut parents: Parents<'g> = HashMap::new();
    let mut queue = VecDeque::new();
    let mut target_depth = None;

    depth.insert(source, 0);
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        let Some(&d) = depth.get(node) else {
            continue;
        };
        // Everything at the target's depth has been seen.
        if target_depth.is_some_and(|t| d > t) {
            break;
        }
        if node == target {
            target_depth = Some(d);
            continue;
        }

        for edge in graph.edges_from(node) {
            match depth.get(&edge.to) {
                None => {
                    depth.insert(&edge.to, d + 1);
                    parents.insert(&edge.to, vec![node]);
                    queue.push_back(&edge.to);
                }
                Some(&seen) if seen == d + 1 => {
                    let preds = parents.entry(&edge.to).or_default();
                    if !preds.contains(&node) {
                        preds.push(node);
                    }
                }
                Some(_) => {}
            }
        }
    }

    target_depth.map(|_| parents)
}

/// Walk predecessor lists back from `node` to `source`, emitting complete
/// paths until `limit` is reached.
fn collect_paths<'g>(
    node: &'g TeraId,
    source: &'g TeraId,
    parents: &Parents<'g>,
    suffix: &mut Vec<&'g TeraId>,
    out: &mut Vec<Vec<TeraId>>,
    limit: usize,
) {
    if out.len() >= limit {
        return;
    }

    suffix.push(node);
    if node == source {
        out.push(suffix.iter().rev().map(|id| (*id).clone()).collect());
    } else if let Some(preds) = parents.get(node) {
        for pred in preds {
            collect_paths(pred, source, parents, suffix, out, limit);
        }
    }
    suffix.pop();
}

/// Sum fares and times along `path`.
fn with_totals(graph: &Graph, path: Vec<TeraId>) -> Option<Itinerary> {
    let mut fare = 0.0;
    let mut time = 0.0;
    for hop in path.windows(2) {
        let edge = graph.edge(&hop[0], &hop[1])?;
        fare += edge.fare;
        time += edge.time;
    }
    Some(Itinerary::new(path, fare, time))
}
