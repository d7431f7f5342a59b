//! Heuristic-guided search (A*).
//!
//! Generalises Dijkstra by ordering the open set on `f = g + h`, where `g` is
//! the cost so far and `h` an estimate of the remaining cost. The engine does
//! not check that `h` is admissible; callers who need optimal paths must
//! supply one that never overestimates.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::domain::StationName;
use crate::network::NetworkGraph;

use super::queue::MinQueue;
use super::strategy::{PathFound, reconstruct_path};

/// Estimate of the remaining cost from one station to another.
pub trait Heuristic {
    /// Estimated cost from `from` to `to`. Negative or NaN estimates are
    /// treated as zero.
    fn estimate(&self, from: &StationName, to: &StationName) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&StationName, &StationName) -> f64,
{
    fn estimate(&self, from: &StationName, to: &StationName) -> f64 {
        self(from, to)
    }
}

/// Default heuristic: absolute difference in name length.
///
/// This carries no geographic meaning and is not admissible in general.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameLengthHeuristic;

impl Heuristic for NameLengthHeuristic {
    fn estimate(&self, from: &StationName, to: &StationName) -> f64 {
        let a = from.as_str().chars().count();
        let b = to.as_str().chars().count();
        a.abs_diff(b) as f64
    }
}

/// Always estimates zero, which makes A* behave exactly like Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _from: &StationName, _to: &StationName) -> f64 {
        0.0
    }
}

fn clamped(heuristic: &dyn Heuristic, from: &StationName, to: &StationName) -> f64 {
    // f64::max ignores NaN
    heuristic.estimate(from, to).max(0.0)
}

/// Find a path from `source` to `destination` guided by `heuristic`.
pub fn find_path_astar(
    graph: &NetworkGraph,
    source: &str,
    destination: &str,
    heuristic: &dyn Heuristic,
) -> Option<PathFound> {
    let source = &graph.station(source)?.name;
    let destination = &graph.station(destination)?.name;

    if source == destination {
        return Some(PathFound::degenerate(source));
    }

    let mut g_score: HashMap<&StationName, f64> = HashMap::from([(source, 0.0)]);
    let mut predecessors: HashMap<&StationName, &StationName> = HashMap::new();
    let mut closed: HashSet<&StationName> = HashSet::new();
    let mut open = MinQueue::new();
    open.push(clamped(heuristic, source, destination), source);

    while let Some((_, current)) = open.pop() {
        if closed.contains(current) {
            continue;
        }

        if current == destination {
            let cost = g_score.get(destination).copied().unwrap_or_default();
            let path = reconstruct_path(&predecessors, source, destination)?;

            debug!(
                strategy = "astar",
                explored = closed.len(),
                stations = path.len(),
                cost,
                "Path found"
            );

            return Some(PathFound {
                path,
                cost,
                interchanges: None,
            });
        }

        closed.insert(current);
        let current_g = g_score.get(current).copied().unwrap_or(f64::INFINITY);

        for edge in graph.neighbors(current.as_str()) {
            let next = &edge.to;
            if closed.contains(next) {
                continue;
            }

            let tentative = current_g + edge.weight;
            let best = g_score.get(next).copied().unwrap_or(f64::INFINITY);
            if tentative < best {
                let f = tentative + clamped(heuristic, next, destination);
                trace!(from = %current, to = %next, g = tentative, f, "A* improved station");

                g_score.insert(next, tentative);
                predecessors.insert(next, current);
                open.push(f, next);
            }
        }
    }

    debug!(
        strategy = "astar",
        explored = closed.len(),
        "Destination unreachable"
    );

    None
}
