//! Shared fixtures for tests.

use crate::domain::{LineName, StationName};

use super::{NetworkGraph, StationRecord};

pub fn station(s: &str) -> StationName {
    StationName::parse(s).unwrap()
}

pub fn line(s: &str) -> LineName {
    LineName::parse(s).unwrap()
}

pub fn record(name: &str, line_id: &str, line_name: &str, position: u32) -> StationRecord {
    StationRecord::new(station(name), line_id, line(line_name), position)
}

/// Build a graph from `(line name, stations in order)` pairs.
pub fn network(lines: &[(&str, &[&str])]) -> NetworkGraph {
    let records = lines
        .iter()
        .flat_map(|(line_name, stations)| {
            stations
                .iter()
                .enumerate()
                .map(move |(i, name)| record(name, line_name, line_name, i as u32 + 1))
        })
        .collect();
    NetworkGraph::from_records(records).unwrap()
}

/// A-B-C on Line1, C-D-E on Line2, sharing interchange C.
pub fn fixture() -> NetworkGraph {
    network(&[("Line1", &["A", "B", "C"]), ("Line2", &["C", "D", "E"])])
}

pub fn names(path: &[StationName]) -> Vec<&str> {
    path.iter().map(StationName::as_str).collect()
}
