//! Application state for the web layer.

use std::sync::Arc;

use crate::network::NetworkSource;
use crate::planner::FareConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Where station records come from
    pub network: Arc<dyn NetworkSource>,

    /// Fare and travel-time rates
    pub fares: Arc<FareConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: impl NetworkSource + 'static, fares: FareConfig) -> Self {
        Self {
            network: Arc::new(network),
            fares: Arc::new(fares),
        }
    }
}
