//! Weighted shortest path (fare or time).

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::domain::TeraId;
use crate::graph::Graph;

use super::mode::Metric;
use super::path::Itinerary;
use super::queue::{HeapQueue, MinQueue};

/// A directed edge excluded from a search.
#[derive(Debug, Clone, Copy)]
pub struct BlockedEdge<'a> {
    pub from: &'a TeraId,
    pub to: &'a TeraId,
}

/// Best known way of reaching a node.
#[derive(Debug, Clone, Copy)]
struct Label<'g> {
    cost: f64,
    fare: f64,
    time: f64,
    prev: Option<&'g TeraId>,
}

/// Cheapest path from `source` to `target` under `metric`.
///
/// Both totals are carried along while relaxing, so the returned itinerary
/// has fare and time without a second pass. Stops as soon as `target` is
/// settled. Returns `None` if `target` is unreachable.
pub fn shortest_path<'g>(
    graph: &'g Graph,
    source: &'g TeraId,
    target: &'g TeraId,
    metric: Metric,
    blocked: Option<BlockedEdge<'_>>,
) -> Option<Itinerary> {
    shortest_path_with::<HeapQueue<&'g TeraId>>(graph, source, target, metric, blocked)
}

/// [`shortest_path`] with a caller-chosen frontier.
pub fn shortest_path_with<'g, Q>(
    graph: &'g Graph,
    source: &'g TeraId,
    target: &'g TeraId,
    metric: Metric,
    blocked: Option<BlockedEdge<'_>>,
) -> Option<Itinerary>
where
    Q: MinQueue<&'g TeraId> + Default,
{
    let mut labels: HashMap<&'g TeraId, Label<'g>> = HashMap::new();
    let mut settled: HashSet<&'g TeraId> = HashSet::new();
    let mut frontier = Q::default();

    labels.insert(
        source,
        Label {
            cost: 0.0,
            fare: 0.0,
            time: 0.0,
            prev: None,
        },
    );
    frontier.push(source, 0.0);

    while let Some((node, _)) = frontier.pop_min() {
        if !settled.insert(node) {
            continue;
        }
        if node == target {
            break;
        }

        let Some(&here) = labels.get(node) else {
            continue;
        };

        for edge in graph.edges_from(node) {
            if blocked.is_some_and(|b| b.from == node && b.to == &edge.to) {
                continue;
            }

            let cost = here.cost + metric.weight(edge);
            let improves = labels.get(&edge.to).is_none_or(|l| cost < l.cost);
            if improves {
                labels.insert(
                    &edge.to,
                    Label {
                        cost,
                        fare: here.fare + edge.fare,
                        time: here.time + edge.time,
                        prev: Some(node),
                    },
                );
                frontier.push(&edge.to, cost);
            }
        }
    }

    trace!(
        source = %source,
        target = %target,
        settled = settled.len(),
        blocked = blocked.is_some(),
        "dijkstra finished"
    );

    let end = labels.get(target)?;

    let mut path = vec![target.clone()];
    let mut cursor = end.prev;
    while let Some(node) = cursor {
        path.push(node.clone());
        cursor = labels.get(node).and_then(|l| l.prev);
    }
    path.reverse();

    Some(Itinerary::new(path, end.fare, end.time))
}
