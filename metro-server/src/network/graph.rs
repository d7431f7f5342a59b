//! In-memory station graph.

use std::collections::BTreeMap;

use crate::domain::{LineName, StationName};

use super::builder::{GraphBuilder, GraphError, StationRecord};

/// A directed reference from one station to an adjacent one.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Station this edge leads to.
    pub to: StationName,

    /// Line on which the two stations are adjacent.
    pub line: LineName,

    /// Search cost of traversing this edge.
    pub weight: f64,

    /// Physical distance between the two stations.
    pub distance_km: f64,
}

/// A station and the lines and edges that serve it.
#[derive(Debug, Clone, PartialEq)]
pub struct StationNode {
    pub name: StationName,

    /// Lines serving this station, in the order they were first seen.
    /// Never empty.
    pub lines: Vec<LineName>,

    /// True if the station is served by several lines or was flagged
    /// as an interchange upstream.
    pub is_interchange: bool,

    /// Outgoing edges, in insertion order.
    pub edges: Vec<Edge>,
}

impl StationNode {
    pub(super) fn new(name: StationName, line: LineName, is_interchange: bool) -> Self {
        Self {
            name,
            lines: vec![line],
            is_interchange,
            edges: Vec::new(),
        }
    }

    /// Check if the given line serves this station.
    pub fn serves(&self, line: &LineName) -> bool {
        self.lines.contains(line)
    }
}

/// The transit network: station name to station node.
///
/// Same-line adjacency is symmetric: if A→B exists on line L then B→A
/// exists on line L. The graph is immutable once built, so it can be
/// shared read-only between concurrent searches.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    pub(super) stations: BTreeMap<StationName, StationNode>,
}

impl NetworkGraph {
    /// Build a hop-weighted graph from flat station records.
    pub fn from_records(records: Vec<StationRecord>) -> Result<Self, GraphError> {
        GraphBuilder::new().records(records).build()
    }

    /// Start building a graph incrementally.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Look up a station by name.
    pub fn station(&self, name: &str) -> Option<&StationNode> {
        self.stations.get(name)
    }

    /// Check if the network has a station with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.stations.contains_key(name)
    }

    /// Lines serving a station; empty if the station is unknown.
    pub fn lines_of(&self, name: &str) -> &[LineName] {
        self.station(name).map_or(&[], |s| s.lines.as_slice())
    }

    /// Outgoing edges of a station; empty if the station is unknown.
    pub fn neighbors(&self, name: &str) -> &[Edge] {
        self.station(name).map_or(&[], |s| s.edges.as_slice())
    }

    /// Whether the station is an interchange. Unknown stations are not.
    pub fn is_interchange(&self, name: &str) -> bool {
        self.station(name).is_some_and(|s| s.is_interchange)
    }

    /// The shortest direct edge from `from` to `to`, if they are adjacent.
    pub fn edge_between(&self, from: &str, to: &str) -> Option<&Edge> {
        self.neighbors(from)
            .iter()
            .filter(|e| e.to.as_str() == to)
            .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
    }

    /// All stations, sorted by name.
    pub fn stations(&self) -> impl Iterator<Item = &StationNode> {
        self.stations.values()
    }

    /// Number of stations in the network.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the network has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Distinct lines in the network, sorted by name.
    pub fn lines(&self) -> Vec<LineName> {
        let mut lines: Vec<LineName> = self
            .stations
            .values()
            .flat_map(|s| s.lines.iter().cloned())
            .collect();
        lines.sort();
        lines.dedup();
        lines
    }
}
