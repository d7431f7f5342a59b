//! Where station records come from.
//!
//! The route service never owns network data; it asks a [`NetworkSource`]
//! for records and builds a fresh graph from them for each request.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{LineName, StationName};

use super::builder::{GraphBuilder, GraphError, StationRecord, Weighting};
use super::graph::NetworkGraph;

/// Errors that can occur when loading network data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Failed to read the network file
    #[error("failed to read network file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Network file is not valid JSON for the expected layout
    #[error("failed to parse network file: {0}")]
    Json(#[from] serde_json::Error),

    /// Records do not form a valid graph
    #[error("invalid network: {0}")]
    Graph(#[from] GraphError),
}

/// Trait for supplying network data to the route service.
///
/// This abstraction allows the service to be tested with in-memory networks.
pub trait NetworkSource: Send + Sync {
    /// Station records, grouped by line and ordered by position.
    fn records(&self) -> Result<Vec<StationRecord>, SourceError>;

    /// How edge weights should be derived for this network.
    fn weighting(&self) -> Weighting {
        Weighting::Hops
    }

    /// Build a fresh graph from the current records.
    fn load_graph(&self) -> Result<NetworkGraph, SourceError> {
        let graph = GraphBuilder::new()
            .records(self.records()?)
            .weighting(self.weighting())
            .build()?;
        Ok(graph)
    }
}

/// One line in a network file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSpec {
    pub id: String,
    pub name: LineName,

    /// Display colour, unused by routing.
    #[serde(default)]
    pub color: Option<String>,

    /// Stations in travel order.
    pub stations: Vec<StationName>,

    /// Distance of each station from the previous one. Missing entries fall
    /// back to the default hop distance.
    #[serde(default)]
    pub distances_km: Vec<f64>,
}

/// The JSON layout of a network file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    pub lines: Vec<LineSpec>,

    /// Stations flagged as interchanges regardless of how many lines
    /// serve them.
    #[serde(default)]
    pub interchanges: Vec<StationName>,

    #[serde(default)]
    pub weighting: Weighting,
}

impl NetworkFile {
    /// Parse a network file from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flatten into station records with positions starting at 1.
    pub fn to_records(&self) -> Vec<StationRecord> {
        let mut records = Vec::new();
        for line in &self.lines {
            for (i, station) in line.stations.iter().enumerate() {
                let mut record =
                    StationRecord::new(station.clone(), &line.id, line.name.clone(), i as u32 + 1)
                        .interchange(self.interchanges.contains(station));
                if i > 0 {
                    if let Some(km) = line.distances_km.get(i) {
                        record = record.distance(*km);
                    }
                }
                records.push(record);
            }
        }
        records
    }
}

/// A network loaded once and served from memory.
#[derive(Debug, Clone)]
pub struct StaticNetwork {
    file: NetworkFile,
}

impl StaticNetwork {
    /// Wrap an already-parsed network file.
    pub fn new(file: NetworkFile) -> Self {
        Self { file }
    }

    /// Read and validate a network file from disk.
    ///
    /// The file is built into a graph once here so that a broken network
    /// fails at startup rather than on the first request.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let network = Self::new(NetworkFile::from_json(&json)?);
        let graph = network.load_graph()?;

        info!(
            path = %path.display(),
            lines = network.file.lines.len(),
            stations = graph.station_count(),
            "Loaded network"
        );

        Ok(network)
    }

    /// The underlying network file.
    pub fn file(&self) -> &NetworkFile {
        &self.file
    }
}

impl NetworkSource for StaticNetwork {
    fn records(&self) -> Result<Vec<StationRecord>, SourceError> {
        Ok(self.file.to_records())
    }

    fn weighting(&self) -> Weighting {
        self.file.weighting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL: &str = r#"{
        "lines": [
            { "id": "l1", "name": "Line1", "color": "red", "stations": ["A", "B", "C"] },
            { "id": "l2", "name": "Line2", "stations": ["C", "D", "E"], "distances_km": [0, 2.0, 3.0] }
        ],
        "interchanges": ["B"]
    }"#;

    #[test]
    fn parses_and_flattens() {
        let file = NetworkFile::from_json(SMALL).unwrap();
        let records = file.to_records();

        assert_eq!(records.len(), 6);
        assert_eq!(records[0].position, 1);
        assert_eq!(records[2].position, 3);
        assert!(records[1].is_interchange);
        assert!(!records[0].is_interchange);
        assert_eq!(records[4].distance_from_previous_km, Some(2.0));
        assert_eq!(records[3].distance_from_previous_km, None);
    }

    #[test]
    fn builds_graph_from_file() {
        let network = StaticNetwork::new(NetworkFile::from_json(SMALL).unwrap());
        let graph = network.load_graph().unwrap();

        assert_eq!(graph.station_count(), 5);
        assert!(graph.is_interchange("B"));
        assert!(graph.is_interchange("C"));
        assert_eq!(graph.edge_between("D", "E").unwrap().distance_km, 3.0);
    }

    #[test]
    fn distance_weighting_from_file() {
        let json = r#"{
            "lines": [{ "id": "l1", "name": "L", "stations": ["A", "B"], "distances_km": [0, 4.5] }],
            "weighting": "distance"
        }"#;
        let network = StaticNetwork::new(NetworkFile::from_json(json).unwrap());
        let graph = network.load_graph().unwrap();

        assert_eq!(graph.edge_between("A", "B").unwrap().weight, 4.5);
    }

    #[test]
    fn negative_file_distance_rejected() {
        let json = r#"{
            "lines": [{ "id": "l1", "name": "L", "stations": ["A", "B", "C"], "distances_km": [0, -5.0, 1.0] }],
            "weighting": "distance"
        }"#;
        let network = StaticNetwork::new(NetworkFile::from_json(json).unwrap());

        assert!(matches!(
            network.load_graph(),
            Err(SourceError::Graph(GraphError::InvalidDistance { km, .. })) if km == -5.0
        ));
    }

    #[test]
    fn invalid_station_name_rejected() {
        let json = r#"{ "lines": [{ "id": "l1", "name": "L", "stations": [""] }] }"#;
        assert!(matches!(
            NetworkFile::from_json(json),
            Err(SourceError::Json(_))
        ));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let network = StaticNetwork::load(file.path()).unwrap();
        assert_eq!(network.file().lines.len(), 2);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StaticNetwork::load(dir.path().join("missing.json"));
        let err = result.unwrap_err();
        assert!(matches!(&err, SourceError::Io { path, .. } if path.ends_with("missing.json")));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn load_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        assert!(matches!(
            StaticNetwork::load(file.path()),
            Err(SourceError::Json(_))
        ));
    }

    #[test]
    fn bundled_hyderabad_network_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/hyderabad.json");
        let network = StaticNetwork::load(path).unwrap();
        let graph = network.load_graph().unwrap();

        assert_eq!(network.file().lines.len(), 3);
        assert!(graph.is_interchange("Ameerpet"));
        assert_eq!(graph.lines_of("Ameerpet").len(), 2);
    }
}
