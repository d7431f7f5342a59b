//! Search strategy selection and the shared search result.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::StationName;
use crate::network::NetworkGraph;

use super::astar::{Heuristic, NameLengthHeuristic, find_path_astar};
use super::bfs::find_path_bfs;
use super::dijkstra::find_path_dijkstra;

/// A path produced by one of the search strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFound {
    /// Stations from source to destination inclusive. Never empty.
    pub path: Vec<StationName>,

    /// Total edge weight along the path.
    pub cost: f64,

    /// Interchanges, if the strategy tracked them during search.
    pub interchanges: Option<Vec<StationName>>,
}

impl PathFound {
    /// The one-station path for a trip that starts at its destination.
    pub(super) fn degenerate(station: &StationName) -> Self {
        Self {
            path: vec![station.clone()],
            cost: 0.0,
            interchanges: Some(Vec::new()),
        }
    }
}

/// Walk predecessor links back from `destination` to `source`.
///
/// Returns `None` if the chain does not terminate at `source`.
pub(super) fn reconstruct_path(
    predecessors: &HashMap<&StationName, &StationName>,
    source: &StationName,
    destination: &StationName,
) -> Option<Vec<StationName>> {
    let mut path = vec![destination.clone()];
    let mut current = destination;

    while current != source {
        // A chain longer than the map has a cycle
        if path.len() > predecessors.len() + 1 {
            return None;
        }
        current = *predecessors.get(current)?;
        path.push(current.clone());
    }

    path.reverse();
    Some(path)
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?}: expected bfs, dijkstra or astar")]
pub struct UnknownStrategy(String);

/// Path search strategy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Breadth-first search: fewest hops.
    #[default]
    Bfs,

    /// Dijkstra: lowest total edge weight.
    Dijkstra,

    /// A*: Dijkstra guided by a heuristic.
    #[serde(rename = "astar")]
    AStar,
}

impl Strategy {
    /// Every strategy, default first.
    pub const ALL: [Strategy; 3] = [Strategy::Bfs, Strategy::Dijkstra, Strategy::AStar];

    /// Lowercase identifier used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dijkstra => "dijkstra",
            Strategy::AStar => "astar",
        }
    }

    /// One-line description for the algorithms listing.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Bfs => "Breadth-First Search - finds the path with the fewest stops",
            Strategy::Dijkstra => {
                "Dijkstra's algorithm - finds the lowest-cost path over weighted edges"
            }
            Strategy::AStar => "A* algorithm - heuristic-guided lowest-cost search",
        }
    }

    /// Run this strategy, using the default heuristic for A*.
    pub fn find_path(
        &self,
        graph: &NetworkGraph,
        source: &str,
        destination: &str,
    ) -> Option<PathFound> {
        self.find_path_with(graph, source, destination, &NameLengthHeuristic)
    }

    /// Run this strategy; `heuristic` is only consulted by A*.
    pub fn find_path_with(
        &self,
        graph: &NetworkGraph,
        source: &str,
        destination: &str,
        heuristic: &dyn Heuristic,
    ) -> Option<PathFound> {
        match self {
            Strategy::Bfs => find_path_bfs(graph, source, destination),
            Strategy::Dijkstra => find_path_dijkstra(graph, source, destination),
            Strategy::AStar => find_path_astar(graph, source, destination, heuristic),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dijkstra" => Ok(Strategy::Dijkstra),
            "astar" | "a*" => Ok(Strategy::AStar),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}
