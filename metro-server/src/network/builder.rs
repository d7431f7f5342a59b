//! Graph construction from upstream station records.
//!
//! The data collaborator supplies one record per (station, line) pair. Records
//! on the same line are ordered by position and every adjacent pair is joined
//! by an edge in both directions.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{LineName, StationName};

use super::graph::{Edge, NetworkGraph, StationNode};

/// Average spacing between adjacent stations when upstream data has none.
pub const DEFAULT_HOP_DISTANCE_KM: f64 = 1.5;

/// Errors raised while building a graph, before any search runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Two records on the same line claim the same position
    #[error("line {line} has both {first} and {second} at position {position}")]
    PositionCollision {
        line: String,
        position: u32,
        first: StationName,
        second: StationName,
    },

    /// An explicit connection names a station no record declared
    #[error("connection references undeclared station {station}")]
    UndeclaredStation { station: StationName },

    /// An explicit connection names a line no record declared
    #[error("connection at {station} references unknown line {line}")]
    UnknownLine {
        line: LineName,
        station: StationName,
    },

    /// A distance is negative, infinite or NaN
    #[error("line {line} has invalid distance {km} km at {station}")]
    InvalidDistance {
        line: String,
        station: StationName,
        km: f64,
    },
}

/// Distances must be finite and non-negative to be usable as weights.
fn check_distance(line: &str, station: &StationName, km: f64) -> Result<(), GraphError> {
    if km.is_finite() && km >= 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidDistance {
            line: line.to_string(),
            station: station.clone(),
            km,
        })
    }
}

/// One station's membership of one line, as supplied upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub station_name: StationName,

    /// Upstream line identifier; records are grouped by this.
    pub line_id: String,

    pub line_name: LineName,

    /// Position of the station along its line. Unique within a line.
    pub position: u32,

    /// Explicit interchange flag from upstream data.
    #[serde(default)]
    pub is_interchange: bool,

    /// Distance from the previous station on the line.
    #[serde(default)]
    pub distance_from_previous_km: Option<f64>,
}

impl StationRecord {
    /// Create a record with no explicit interchange flag or distance.
    pub fn new(
        station_name: StationName,
        line_id: impl Into<String>,
        line_name: LineName,
        position: u32,
    ) -> Self {
        Self {
            station_name,
            line_id: line_id.into(),
            line_name,
            position,
            is_interchange: false,
            distance_from_previous_km: None,
        }
    }

    /// Set the explicit interchange flag.
    pub fn interchange(mut self, flag: bool) -> Self {
        self.is_interchange = flag;
        self
    }

    /// Set the distance from the previous station on the line.
    pub fn distance(mut self, km: f64) -> Self {
        self.distance_from_previous_km = Some(km);
        self
    }
}

/// How edge weights are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Every hop costs 1.
    #[default]
    Hops,

    /// Every hop costs its physical distance.
    Distance,
}

/// An explicit link between two declared stations.
#[derive(Debug, Clone)]
struct Connection {
    from: StationName,
    to: StationName,
    line: LineName,
    distance_km: f64,
}

/// Incremental graph builder.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    records: Vec<StationRecord>,
    connections: Vec<Connection>,
    weighting: Weighting,
}

impl GraphBuilder {
    /// Create an empty builder using hop weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single station record.
    pub fn add_record(mut self, record: StationRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Add many station records.
    pub fn records(mut self, records: impl IntoIterator<Item = StationRecord>) -> Self {
        self.records.extend(records);
        self
    }

    /// Add an explicit bidirectional link between two stations.
    ///
    /// Both stations must be declared by some record, the line must be
    /// declared by some record, and the distance must be finite and
    /// non-negative, otherwise `build` fails.
    pub fn connect(
        mut self,
        from: StationName,
        to: StationName,
        line: LineName,
        distance_km: f64,
    ) -> Self {
        self.connections.push(Connection {
            from,
            to,
            line,
            distance_km,
        });
        self
    }

    /// Choose how edge weights are derived.
    pub fn weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    fn weight_for(&self, distance_km: f64) -> f64 {
        match self.weighting {
            Weighting::Hops => 1.0,
            Weighting::Distance => distance_km,
        }
    }

    /// Build the graph.
    pub fn build(&self) -> Result<NetworkGraph, GraphError> {
        let mut stations: BTreeMap<StationName, StationNode> = BTreeMap::new();

        // Group by line id, keeping lines in order of first appearance
        let mut line_order: Vec<&str> = Vec::new();
        let mut by_line: HashMap<&str, Vec<&StationRecord>> = HashMap::new();
        for record in &self.records {
            let group = by_line.entry(record.line_id.as_str()).or_insert_with(|| {
                line_order.push(record.line_id.as_str());
                Vec::new()
            });
            group.push(record);
        }

        for line_id in &line_order {
            let Some(group) = by_line.get_mut(line_id) else {
                continue;
            };
            group.sort_by_key(|r| r.position);

            for pair in group.windows(2) {
                if pair[0].position == pair[1].position {
                    return Err(GraphError::PositionCollision {
                        line: (*line_id).to_string(),
                        position: pair[0].position,
                        first: pair[0].station_name.clone(),
                        second: pair[1].station_name.clone(),
                    });
                }
            }

            for record in group.iter() {
                if let Some(km) = record.distance_from_previous_km {
                    check_distance(line_id, &record.station_name, km)?;
                }
                match stations.get_mut(record.station_name.as_str()) {
                    Some(node) => {
                        if !node.serves(&record.line_name) {
                            node.lines.push(record.line_name.clone());
                        }
                        node.is_interchange |= record.is_interchange;
                    }
                    None => {
                        stations.insert(
                            record.station_name.clone(),
                            StationNode::new(
                                record.station_name.clone(),
                                record.line_name.clone(),
                                record.is_interchange,
                            ),
                        );
                    }
                }
            }

            for pair in group.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.station_name == b.station_name {
                    continue;
                }
                let distance_km = b
                    .distance_from_previous_km
                    .unwrap_or(DEFAULT_HOP_DISTANCE_KM);
                self.link(
                    &mut stations,
                    &a.station_name,
                    &b.station_name,
                    &a.line_name,
                    distance_km,
                );
            }
        }

        let known_lines: HashSet<&LineName> = self.records.iter().map(|r| &r.line_name).collect();
        for conn in &self.connections {
            for station in [&conn.from, &conn.to] {
                if !stations.contains_key(station.as_str()) {
                    return Err(GraphError::UndeclaredStation {
                        station: station.clone(),
                    });
                }
            }
            if !known_lines.contains(&conn.line) {
                return Err(GraphError::UnknownLine {
                    line: conn.line.clone(),
                    station: conn.from.clone(),
                });
            }
            check_distance(conn.line.as_str(), &conn.to, conn.distance_km)?;
            if conn.from != conn.to {
                self.link(
                    &mut stations,
                    &conn.from,
                    &conn.to,
                    &conn.line,
                    conn.distance_km,
                );
            }
        }

        for node in stations.values_mut() {
            if node.lines.len() > 1 {
                node.is_interchange = true;
            }
        }

        debug!(
            stations = stations.len(),
            lines = line_order.len(),
            connections = self.connections.len(),
            "Network graph built"
        );

        Ok(NetworkGraph { stations })
    }

    /// Insert a symmetric pair of edges. Both stations must exist.
    fn link(
        &self,
        stations: &mut BTreeMap<StationName, StationNode>,
        a: &StationName,
        b: &StationName,
        line: &LineName,
        distance_km: f64,
    ) {
        let weight = self.weight_for(distance_km);
        for (from, to) in [(a, b), (b, a)] {
            if let Some(node) = stations.get_mut(from.as_str()) {
                node.edges.push(Edge {
                    to: to.clone(),
                    line: line.clone(),
                    weight,
                    distance_km,
                });
            }
        }
    }
}
