//! Breadth-first search: the default strategy.
//!
//! Explores the network level by level from the source, so the first time the
//! destination is dequeued the path to it has the fewest possible hops. Edge
//! weights do not steer the search, but the reported cost is the weight sum
//! of the edges actually taken. Interchanges are tracked while the search
//! runs.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::domain::StationName;
use crate::network::NetworkGraph;

use super::interchange::is_interchange_on_path;
use super::strategy::{PathFound, reconstruct_path};

/// Find the path with the fewest hops from `source` to `destination`.
///
/// Returns `None` if either station is absent or the destination is
/// unreachable.
pub fn find_path_bfs(graph: &NetworkGraph, source: &str, destination: &str) -> Option<PathFound> {
    let source = &graph.station(source)?.name;
    let destination = &graph.station(destination)?.name;

    if source == destination {
        return Some(PathFound::degenerate(source));
    }

    let mut queue: VecDeque<&StationName> = VecDeque::from([source]);
    let mut visited: HashSet<&StationName> = HashSet::new();
    // First discovery wins, which keeps each predecessor on a shortest-hop path
    let mut predecessors: HashMap<&StationName, &StationName> = HashMap::new();
    // Interchanges on the path to each discovered station
    let mut interchanges: HashMap<&StationName, Vec<StationName>> = HashMap::new();
    interchanges.insert(source, Vec::new());
    // Weight of the discovering edges from the source
    let mut cost_to: HashMap<&StationName, f64> = HashMap::from([(source, 0.0)]);

    while let Some(current) = queue.pop_front() {
        if current == destination {
            let path = reconstruct_path(&predecessors, source, destination)?;
            let cost = cost_to.get(destination).copied().unwrap_or_default();

            debug!(
                strategy = "bfs",
                explored = visited.len(),
                stations = path.len(),
                "Path found"
            );

            return Some(PathFound {
                path,
                cost,
                interchanges: interchanges.remove(destination),
            });
        }

        if !visited.insert(current) {
            continue;
        }

        let previous = predecessors.get(current).copied();

        for edge in graph.neighbors(current.as_str()) {
            let next = &edge.to;
            if visited.contains(next) || next == source || predecessors.contains_key(next) {
                continue;
            }

            trace!(from = %current, to = %next, line = %edge.line, "BFS discovered station");

            let mut seen = interchanges.get(current).cloned().unwrap_or_default();
            if let Some(prev) = previous {
                if is_interchange_on_path(graph, prev.as_str(), current.as_str(), next.as_str()) {
                    seen.push(current.clone());
                }
            }

            let cost = cost_to.get(current).copied().unwrap_or_default() + edge.weight;
            predecessors.insert(next, current);
            cost_to.insert(next, cost);
            interchanges.insert(next, seen);
            queue.push_back(next);
        }
    }

    debug!(
        strategy = "bfs",
        explored = visited.len(),
        "Destination unreachable"
    );

    None
}
