//! Weighted shortest path (Dijkstra).

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::domain::StationName;
use crate::network::NetworkGraph;

use super::queue::MinQueue;
use super::strategy::{PathFound, reconstruct_path};

/// Find the lowest-weight path from `source` to `destination`.
///
/// Stations missing from the distance map are at infinite distance. Ties
/// between equally distant stations are broken by the order in which they
/// were queued, so results are reproducible.
pub fn find_path_dijkstra(
    graph: &NetworkGraph,
    source: &str,
    destination: &str,
) -> Option<PathFound> {
    let source = &graph.station(source)?.name;
    let destination = &graph.station(destination)?.name;

    if source == destination {
        return Some(PathFound::degenerate(source));
    }

    let mut distances: HashMap<&StationName, f64> = HashMap::from([(source, 0.0)]);
    let mut predecessors: HashMap<&StationName, &StationName> = HashMap::new();
    let mut visited: HashSet<&StationName> = HashSet::new();
    let mut queue = MinQueue::new();
    queue.push(0.0, source);

    while let Some((distance, current)) = queue.pop() {
        if !visited.insert(current) {
            continue;
        }
        if current == destination {
            break;
        }

        for edge in graph.neighbors(current.as_str()) {
            let next = &edge.to;
            if visited.contains(next) {
                continue;
            }

            let candidate = distance + edge.weight;
            let best = distances.get(next).copied().unwrap_or(f64::INFINITY);
            if candidate < best {
                trace!(from = %current, to = %next, distance = candidate, "Relaxed edge");
                distances.insert(next, candidate);
                predecessors.insert(next, current);
                queue.push(candidate, next);
            }
        }
    }

    let Some(&cost) = distances.get(destination) else {
        debug!(
            strategy = "dijkstra",
            explored = visited.len(),
            "Destination unreachable"
        );
        return None;
    };
    let path = reconstruct_path(&predecessors, source, destination)?;

    debug!(
        strategy = "dijkstra",
        explored = visited.len(),
        stations = path.len(),
        cost,
        "Path found"
    );

    Some(PathFound {
        path,
        cost,
        interchanges: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::test_support::{fixture, names, network, record};
    use crate::network::{NetworkGraph, Weighting};

    #[test]
    fn fixture_route() {
        let graph = fixture();
        let found = find_path_dijkstra(&graph, "A", "E").unwrap();

        assert_eq!(names(&found.path), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(found.cost, 4.0);
        assert!(found.interchanges.is_none());
    }

    #[test]
    fn same_station_is_degenerate() {
        let graph = fixture();
        let found = find_path_dijkstra(&graph, "B", "B").unwrap();
        assert_eq!(names(&found.path), vec!["B"]);
        assert_eq!(found.cost, 0.0);
    }

    #[test]
    fn missing_and_unreachable() {
        let graph = network(&[("L1", &["A", "B"]), ("L2", &["X", "Y"])]);
        assert!(find_path_dijkstra(&graph, "A", "Q").is_none());
        assert!(find_path_dijkstra(&graph, "Q", "A").is_none());
        assert!(find_path_dijkstra(&graph, "A", "Y").is_none());
    }

    #[test]
    fn prefers_shorter_distance_over_fewer_hops() {
        // Direct hop A-E is 10 km; going round via B, C is 3 km
        let graph = NetworkGraph::builder()
            .records(vec![
                record("A", "l1", "L1", 1),
                record("B", "l1", "L1", 2).distance(1.0),
                record("C", "l1", "L1", 3).distance(1.0),
                record("E", "l1", "L1", 4).distance(1.0),
                record("A", "l2", "L2", 1),
                record("E", "l2", "L2", 2).distance(10.0),
            ])
            .weighting(Weighting::Distance)
            .build()
            .unwrap();

        let found = find_path_dijkstra(&graph, "A", "E").unwrap();
        assert_eq!(names(&found.path), vec!["A", "B", "C", "E"]);
        assert_eq!(found.cost, 3.0);
    }

    #[test]
    fn ties_are_deterministic() {
        let graph = network(&[("L1", &["A", "P", "Z"]), ("L2", &["A", "Q", "Z"])]);
        let first = find_path_dijkstra(&graph, "A", "Z").unwrap();
        for _ in 0..10 {
            assert_eq!(find_path_dijkstra(&graph, "A", "Z").unwrap(), first);
        }
        assert_eq!(names(&first.path), vec!["A", "P", "Z"]);
    }
}
