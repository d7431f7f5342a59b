//! Fare and travel-time configuration.

use serde::{Deserialize, Serialize};

/// Rate constants for the fare and travel-time estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    /// Fixed fare covering the first `free_stations` stations.
    pub base_fare: u32,

    /// Number of stations covered by the base fare.
    pub free_stations: usize,

    /// Fare for each station beyond `free_stations`.
    pub per_station_rate: u32,

    /// Fare added for each interchange.
    pub per_interchange_rate: u32,

    /// Minutes per hop between adjacent stations.
    pub per_hop_minutes: f64,

    /// Minutes added for each interchange.
    pub per_interchange_minutes: f64,
}

impl FareConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        base_fare: u32,
        free_stations: usize,
        per_station_rate: u32,
        per_interchange_rate: u32,
        per_hop_minutes: f64,
        per_interchange_minutes: f64,
    ) -> Self {
        Self {
            base_fare,
            free_stations,
            per_station_rate,
            per_interchange_rate,
            per_hop_minutes,
            per_interchange_minutes,
        }
    }
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            base_fare: 10,
            free_stations: 2,
            per_station_rate: 5,
            per_interchange_rate: 2,
            per_hop_minutes: 2.5,
            per_interchange_minutes: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FareConfig::default();

        assert_eq!(config.base_fare, 10);
        assert_eq!(config.free_stations, 2);
        assert_eq!(config.per_station_rate, 5);
        assert_eq!(config.per_interchange_rate, 2);
        assert_eq!(config.per_hop_minutes, 2.5);
        assert_eq!(config.per_interchange_minutes, 5.0);
    }

    #[test]
    fn custom_config() {
        let config = FareConfig::new(20, 3, 4, 1, 3.0, 6.0);

        assert_eq!(config.base_fare, 20);
        assert_eq!(config.free_stations, 3);
        assert_eq!(config.per_station_rate, 4);
        assert_eq!(config.per_interchange_rate, 1);
        assert_eq!(config.per_hop_minutes, 3.0);
        assert_eq!(config.per_interchange_minutes, 6.0);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: FareConfig = serde_json::from_str(r#"{ "base_fare": 12 }"#).unwrap();
        assert_eq!(config.base_fare, 12);
        assert_eq!(config.per_station_rate, 5);
    }
}
