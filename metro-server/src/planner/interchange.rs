//! Interchange and line-change detection along a path.
//!
//! For each interior station `curr` between `prev` and `next`, let
//! `L1 = lines(prev) ∩ lines(curr)` and `L2 = lines(curr) ∩ lines(next)`.
//! The traveler changes line at `curr` if `L1` is empty, `L2` is empty, or
//! no line is in both. The same rule is used inline by BFS and post-hoc for
//! the other strategies, so both always agree.

use serde::Serialize;

use crate::domain::{LineName, StationName};
use crate::network::NetworkGraph;

/// A change of line at a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChange {
    /// Line being left.
    pub from: LineName,

    /// Line being joined.
    pub to: LineName,

    /// Station where the change happens.
    pub at: StationName,
}

/// Interchanges and line changes along one path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub interchanges: Vec<StationName>,
    pub line_changes: Vec<LineChange>,
}

/// Lines of `a` (in `a`'s order) that also serve `b`.
fn common_lines<'g>(graph: &'g NetworkGraph, a: &str, b: &str) -> Vec<&'g LineName> {
    let b_lines = graph.lines_of(b);
    graph
        .lines_of(a)
        .iter()
        .filter(|line| b_lines.contains(line))
        .collect()
}

/// Check whether passing `prev → curr → next` requires changing line at `curr`.
pub fn is_line_change(graph: &NetworkGraph, prev: &str, curr: &str, next: &str) -> bool {
    let l1 = common_lines(graph, prev, curr);
    let l2 = common_lines(graph, curr, next);

    l1.is_empty() || l2.is_empty() || !l1.iter().any(|line| l2.contains(line))
}

/// The `(from, to)` lines for a change at `curr`, if both exist and differ.
///
/// `from` is the first line of `prev` that serves `curr`; `to` is the first
/// line of `next` that serves `curr`.
fn changed_lines<'g>(
    graph: &'g NetworkGraph,
    prev: &str,
    curr: &str,
    next: &str,
) -> Option<(&'g LineName, &'g LineName)> {
    let curr_lines = graph.lines_of(curr);
    let from = graph
        .lines_of(prev)
        .iter()
        .find(|line| curr_lines.contains(line))?;
    let to = graph
        .lines_of(next)
        .iter()
        .find(|line| curr_lines.contains(line))?;

    (from != to).then_some((from, to))
}

/// Whether a traveler arriving from `prev` records `curr` as an interchange
/// on the way to `next`.
pub(super) fn is_interchange_on_path(
    graph: &NetworkGraph,
    prev: &str,
    curr: &str,
    next: &str,
) -> bool {
    graph.is_interchange(curr) && is_line_change(graph, prev, curr, next)
}

/// Stations along `path` where the traveler changes line.
///
/// Only stations flagged as interchanges in the graph are listed; a
/// multi-line station passed through on one line is not.
pub fn find_interchanges(graph: &NetworkGraph, path: &[StationName]) -> Vec<StationName> {
    path.windows(3)
        .filter(|w| is_interchange_on_path(graph, w[0].as_str(), w[1].as_str(), w[2].as_str()))
        .map(|w| w[1].clone())
        .collect()
}

/// Line changes along `path`, one per station where the line changes.
pub fn line_changes(graph: &NetworkGraph, path: &[StationName]) -> Vec<LineChange> {
    path.windows(3)
        .filter(|w| is_line_change(graph, w[0].as_str(), w[1].as_str(), w[2].as_str()))
        .filter_map(|w| {
            let (from, to) = changed_lines(graph, w[0].as_str(), w[1].as_str(), w[2].as_str())?;
            Some(LineChange {
                from: from.clone(),
                to: to.clone(),
                at: w[1].clone(),
            })
        })
        .collect()
}

/// Interchanges and line changes for `path`.
pub fn analyze(graph: &NetworkGraph, path: &[StationName]) -> Analysis {
    Analysis {
        interchanges: find_interchanges(graph, path),
        line_changes: line_changes(graph, path),
    }
}
