//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::StationName;
use crate::network::SourceError;
use crate::planner::{Endpoint, RouteError, RoutePlanner, RouteRequest, Strategy};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/route/algorithms", get(algorithms))
        .route("/api/route/find", post(find_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let stations = state.network.load_graph().ok().map(|g| g.station_count());

    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
        stations,
    })
}

/// List the available search algorithms.
async fn algorithms() -> Json<ApiResponse<AlgorithmsData>> {
    Json(ApiResponse::ok(AlgorithmsData::all()))
}

/// Find a route between two stations.
async fn find_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<RouteData>>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: FindRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(
            error = %e,
            body = %String::from_utf8_lossy(&body),
            "Rejected route request body"
        );
        AppError::BadRequest {
            error: "Invalid request body",
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let source = StationName::parse(&req.source).map_err(|e| AppError::BadRequest {
        error: "Validation failed",
        message: format!("source: {e}"),
    })?;
    let destination = StationName::parse(&req.destination).map_err(|e| AppError::BadRequest {
        error: "Validation failed",
        message: format!("destination: {e}"),
    })?;

    let strategy = req
        .algorithm
        .as_deref()
        .map(str::parse::<Strategy>)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            error: "Validation failed",
            message: e.to_string(),
        })?
        .unwrap_or_default();

    let graph = state.network.load_graph()?;
    let request = RouteRequest::new(source.as_str(), destination.as_str()).with_strategy(strategy);
    let result = RoutePlanner::new(&graph, &state.fares).find_route(&request)?;

    info!(
        source = %source,
        destination = %destination,
        algorithm = %strategy,
        stations = result.total_stations(),
        interchanges = result.interchanges.len(),
        fare = result.fare.total,
        "Route request served"
    );

    Ok(Json(ApiResponse::ok(RouteData::from_result(&result))))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        error: &'static str,
        message: String,
    },
    NotFound {
        error: &'static str,
        message: String,
    },
    Internal {
        message: String,
    },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::StationNotFound { side, station } => AppError::NotFound {
                error: match side {
                    Endpoint::Source => "Source station not found",
                    Endpoint::Destination => "Destination station not found",
                },
                message: format!("Station '{station}' does not exist in the network"),
            },
            RouteError::NoRouteExists { from, to } => AppError::NotFound {
                error: "No route found",
                message: format!("No route exists between '{from}' and '{to}'"),
            },
        }
    }
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::BadRequest { error, message } => (StatusCode::BAD_REQUEST, error, message),
            AppError::NotFound { error, message } => (StatusCode::NOT_FOUND, error, message),
            AppError::Internal { message } => {
                error!(%message, "Failed to find route");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "Failed to find route".to_string(),
                )
            }
        };

        if status.is_client_error() {
            warn!(%status, error, %message, "Request failed");
        }

        let body = Json(ErrorResponse {
            success: false,
            error: error.to_string(),
            message,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{NetworkFile, StaticNetwork, StationRecord};
    use crate::planner::FareConfig;
    use serde_json::Value;

    const NETWORK: &str = r#"{
        "lines": [
            { "id": "l1", "name": "Line1", "stations": ["A", "B", "C"] },
            { "id": "l2", "name": "Line2", "stations": ["C", "D", "E"] },
            { "id": "l3", "name": "Line3", "stations": ["X", "Y"] }
        ],
        "interchanges": ["C"]
    }"#;

    fn state() -> AppState {
        let file = NetworkFile::from_json(NETWORK).unwrap();
        AppState::new(StaticNetwork::new(file), FareConfig::default())
    }

    /// A source whose backing store is unavailable.
    struct BrokenNetwork;

    impl crate::network::NetworkSource for BrokenNetwork {
        fn records(&self) -> Result<Vec<StationRecord>, SourceError> {
            Err(SourceError::Io {
                path: "network.json".into(),
                source: std::io::Error::other("disk on fire"),
            })
        }
    }

    async fn call(state: AppState, body: &str) -> (StatusCode, Value) {
        let response = find_route(State(state), Bytes::from(body.to_string()))
            .await
            .into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn finds_route() {
        let (status, json) = call(state(), r#"{ "source": "A", "destination": "E" }"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["route"], serde_json::json!(["A", "B", "C", "D", "E"]));
        assert_eq!(json["data"]["totalFare"], 27);
        assert_eq!(json["data"]["estimatedTime"], "15 minutes");
        assert_eq!(json["data"]["algorithm"], "bfs");
    }

    #[tokio::test]
    async fn honours_algorithm() {
        let (status, json) = call(
            state(),
            r#"{ "source": "A", "destination": "E", "algorithm": "A*" }"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["algorithm"], "astar");
        assert_eq!(json["data"]["totalStations"], 5);
    }

    #[tokio::test]
    async fn same_station_is_free() {
        let (status, json) = call(state(), r#"{ "source": "B", "destination": "B" }"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["route"], serde_json::json!(["B"]));
        assert_eq!(json["data"]["totalFare"], 0);
        assert_eq!(json["data"]["estimatedTime"], "0 minutes");
    }

    #[tokio::test]
    async fn unknown_source() {
        let (status, json) = call(state(), r#"{ "source": "Nowhere", "destination": "E" }"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Source station not found");
        assert_eq!(
            json["message"],
            "Station 'Nowhere' does not exist in the network"
        );
    }

    #[tokio::test]
    async fn unknown_destination() {
        let (status, json) = call(state(), r#"{ "source": "A", "destination": "Nowhere" }"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Destination station not found");
    }

    #[tokio::test]
    async fn disconnected_stations() {
        let (status, json) = call(state(), r#"{ "source": "A", "destination": "X" }"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "No route found");
        assert_eq!(json["message"], "No route exists between 'A' and 'X'");
    }

    #[tokio::test]
    async fn rejects_bad_json() {
        let (status, json) = call(state(), "{ not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let (status, json) = call(state(), r#"{ "source": "  ", "destination": "E" }"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Validation failed");
    }

    #[tokio::test]
    async fn rejects_overlong_name() {
        let body = serde_json::json!({ "source": "A".repeat(101), "destination": "E" });
        let (status, _) = call(state(), &body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_unknown_algorithm() {
        let (status, json) = call(
            state(),
            r#"{ "source": "A", "destination": "E", "algorithm": "greedy" }"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Validation failed");
    }

    #[tokio::test]
    async fn source_failure_is_internal() {
        let state = AppState::new(BrokenNetwork, FareConfig::default());
        let (status, json) = call(state, r#"{ "source": "A", "destination": "E" }"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["message"], "Failed to find route");
    }

    #[tokio::test]
    async fn health_reports_station_count() {
        let Json(health) = health(State(state())).await;

        assert_eq!(health.status, "OK");
        assert_eq!(health.stations, Some(7));
        assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
    }

    #[tokio::test]
    async fn health_survives_broken_network() {
        let state = AppState::new(BrokenNetwork, FareConfig::default());
        let Json(health) = health(State(state)).await;

        assert_eq!(health.status, "OK");
        assert_eq!(health.stations, None);
    }

    #[tokio::test]
    async fn lists_algorithms() {
        let Json(response) = algorithms().await;

        assert!(response.success);
        assert_eq!(response.data.available, Strategy::ALL.to_vec());
        assert_eq!(response.data.default, Strategy::Bfs);
    }
}
