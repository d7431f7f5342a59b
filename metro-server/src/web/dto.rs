//! Data transfer objects for web requests and responses.
//!
//! Field names follow the camelCase layout existing front-ends expect.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::planner::{Fare, LineChange, RouteResult, Strategy};

/// Request to find a route.
#[derive(Debug, Deserialize)]
pub struct FindRouteRequest {
    /// Source station name
    pub source: String,

    /// Destination station name
    pub destination: String,

    /// Search algorithm (defaults to BFS)
    #[serde(default)]
    pub algorithm: Option<String>,
}

/// Successful response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap data in a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A found route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    /// Station names from source to destination
    pub route: Vec<String>,

    pub total_stations: usize,

    /// Total distance in kilometres
    pub total_distance: f64,

    pub total_fare: u32,

    /// Stations where the traveler changes line
    pub interchanges: Vec<String>,

    /// Human-readable travel time, e.g. "15 minutes"
    pub estimated_time: String,

    pub line_changes: Vec<LineChangeResult>,

    pub fare_breakdown: FareBreakdown,

    /// Algorithm that produced the route
    pub algorithm: Strategy,
}

/// A change of line at a station.
#[derive(Debug, Serialize)]
pub struct LineChangeResult {
    pub from: String,
    pub to: String,
    pub at: String,
}

/// Fare components.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub base_fare: u32,
    pub additional_fare: u32,
    pub interchange_penalty: u32,
    pub total: u32,
}

/// Available search algorithms.
#[derive(Debug, Serialize)]
pub struct AlgorithmsData {
    pub available: Vec<Strategy>,
    pub default: Strategy,
    pub description: BTreeMap<Strategy, &'static str>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,

    /// Current time, RFC 3339
    pub timestamp: String,

    /// Stations in the network, if it could be loaded
    pub stations: Option<usize>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,

    /// Short error category
    pub error: String,

    /// Error message
    pub message: String,
}

// Conversion implementations

impl RouteData {
    /// Create from a planner RouteResult.
    pub fn from_result(result: &RouteResult) -> Self {
        Self {
            route: result.path.iter().map(|s| s.to_string()).collect(),
            total_stations: result.total_stations(),
            total_distance: result.total_distance_km,
            total_fare: result.fare.total,
            interchanges: result.interchanges.iter().map(|s| s.to_string()).collect(),
            estimated_time: format!("{} minutes", result.time_minutes),
            line_changes: result
                .line_changes
                .iter()
                .map(LineChangeResult::from_line_change)
                .collect(),
            fare_breakdown: FareBreakdown::from_fare(&result.fare),
            algorithm: result.strategy,
        }
    }
}

impl LineChangeResult {
    /// Create from a planner LineChange.
    pub fn from_line_change(change: &LineChange) -> Self {
        Self {
            from: change.from.to_string(),
            to: change.to.to_string(),
            at: change.at.to_string(),
        }
    }
}

impl FareBreakdown {
    /// Create from a planner Fare.
    pub fn from_fare(fare: &Fare) -> Self {
        Self {
            base_fare: fare.base,
            additional_fare: fare.additional,
            interchange_penalty: fare.interchange_penalty,
            total: fare.total,
        }
    }
}

impl AlgorithmsData {
    /// Describe every strategy the planner supports.
    pub fn all() -> Self {
        Self {
            available: Strategy::ALL.to_vec(),
            default: Strategy::default(),
            description: Strategy::ALL
                .iter()
                .map(|s| (*s, s.description()))
                .collect(),
        }
    }
}
