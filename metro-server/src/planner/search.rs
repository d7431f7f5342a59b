//! Route finding: search, interchange analysis, fare and time.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::domain::StationName;
use crate::network::NetworkGraph;

use super::astar::{Heuristic, NameLengthHeuristic};
use super::config::FareConfig;
use super::fare::Fare;
use super::interchange::{LineChange, find_interchanges, line_changes};
use super::strategy::Strategy;

/// Which end of a route a station was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Error from route finding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The named station is not in the network
    #[error("{side} station '{station}' does not exist in the network")]
    StationNotFound { side: Endpoint, station: String },

    /// Both stations exist but nothing connects them
    #[error("no route exists between '{from}' and '{to}'")]
    NoRouteExists { from: StationName, to: StationName },
}

/// Request for a route between two stations.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub source: String,
    pub destination: String,
    pub strategy: Strategy,
}

impl RouteRequest {
    /// Create a request using the default strategy.
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            strategy: Strategy::default(),
        }
    }

    /// Use a specific search strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// A found route with its fare and travel time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Stations from source to destination inclusive.
    pub path: Vec<StationName>,

    /// Stations where the traveler changes line, in path order.
    pub interchanges: Vec<StationName>,

    pub line_changes: Vec<LineChange>,

    pub fare: Fare,

    pub time_minutes: u32,

    /// Sum of the physical lengths of the traversed edges.
    pub total_distance_km: f64,

    /// Strategy that produced the path.
    pub strategy: Strategy,
}

impl RouteResult {
    /// Number of stations on the path, including both ends.
    pub fn total_stations(&self) -> usize {
        self.path.len()
    }
}

/// Route planner over one network snapshot.
pub struct RoutePlanner<'a> {
    graph: &'a NetworkGraph,
    fares: &'a FareConfig,
}

impl<'a> RoutePlanner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a NetworkGraph, fares: &'a FareConfig) -> Self {
        Self { graph, fares }
    }

    /// Find a route, using the default heuristic if the strategy is A*.
    pub fn find_route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        self.find_route_with(request, &NameLengthHeuristic)
    }

    /// Find a route, using `heuristic` if the strategy is A*.
    pub fn find_route_with(
        &self,
        request: &RouteRequest,
        heuristic: &dyn Heuristic,
    ) -> Result<RouteResult, RouteError> {
        let source = self.endpoint(&request.source, Endpoint::Source)?;
        let destination = self.endpoint(&request.destination, Endpoint::Destination)?;

        let found = request
            .strategy
            .find_path_with(self.graph, source.as_str(), destination.as_str(), heuristic)
            .ok_or_else(|| RouteError::NoRouteExists {
                from: source.clone(),
                to: destination.clone(),
            })?;

        let path = found.path;
        let interchanges = found
            .interchanges
            .unwrap_or_else(|| find_interchanges(self.graph, &path));
        let line_changes = line_changes(self.graph, &path);
        let fare = self.fares.fare(path.len(), interchanges.len());
        let time_minutes = self
            .fares
            .travel_time_minutes(path.len(), interchanges.len());
        let total_distance_km = path_distance_km(self.graph, &path);

        debug!(
            strategy = %request.strategy,
            source = %source,
            destination = %destination,
            stations = path.len(),
            interchanges = interchanges.len(),
            fare = fare.total,
            "Route found"
        );

        Ok(RouteResult {
            path,
            interchanges,
            line_changes,
            fare,
            time_minutes,
            total_distance_km,
            strategy: request.strategy,
        })
    }

    fn endpoint(&self, name: &str, side: Endpoint) -> Result<&'a StationName, RouteError> {
        self.graph
            .station(name.trim())
            .map(|s| &s.name)
            .ok_or_else(|| RouteError::StationNotFound {
                side,
                station: name.to_string(),
            })
    }
}

/// Physical length of a path, following the shortest edge between each pair.
fn path_distance_km(graph: &NetworkGraph, path: &[StationName]) -> f64 {
    path.windows(2)
        .map(|w| {
            graph
                .edge_between(w[0].as_str(), w[1].as_str())
                .map_or(0.0, |e| e.distance_km)
        })
        .sum()
}

/// Find a route with the default fare rates.
pub fn find_route(
    graph: &NetworkGraph,
    source: &str,
    destination: &str,
    strategy: Strategy,
) -> Result<RouteResult, RouteError> {
    let fares = FareConfig::default();
    RoutePlanner::new(graph, &fares)
        .find_route(&RouteRequest::new(source, destination).with_strategy(strategy))
}

/// Find a route with the default fare rates and a caller-supplied A*
/// heuristic.
pub fn find_route_with_heuristic(
    graph: &NetworkGraph,
    source: &str,
    destination: &str,
    strategy: Strategy,
    heuristic: &dyn Heuristic,
) -> Result<RouteResult, RouteError> {
    let fares = FareConfig::default();
    RoutePlanner::new(graph, &fares).find_route_with(
        &RouteRequest::new(source, destination).with_strategy(strategy),
        heuristic,
    )
}
