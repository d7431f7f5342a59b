//! Fare and travel-time estimates.
//!
//! Both are pure functions of the number of stations on the path and the
//! number of interchanges. A one-station trip is free and takes no time.

use serde::Serialize;

use super::config::FareConfig;

/// Fare broken down into its components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Fare {
    pub base: u32,
    pub additional: u32,
    pub interchange_penalty: u32,
    pub total: u32,
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl FareConfig {
    /// Fare for a path of `stations` stations with `interchanges` changes.
    pub fn fare(&self, stations: usize, interchanges: usize) -> Fare {
        if stations <= 1 {
            return Fare::default();
        }

        let extra_stations = stations.saturating_sub(self.free_stations);
        let additional = saturating_u32(extra_stations).saturating_mul(self.per_station_rate);
        let interchange_penalty =
            saturating_u32(interchanges).saturating_mul(self.per_interchange_rate);

        Fare {
            base: self.base_fare,
            additional,
            interchange_penalty,
            total: self
                .base_fare
                .saturating_add(additional)
                .saturating_add(interchange_penalty),
        }
    }

    /// Travel time in whole minutes, rounded to nearest.
    pub fn travel_time_minutes(&self, stations: usize, interchanges: usize) -> u32 {
        if stations <= 1 {
            return 0;
        }

        let hops = (stations - 1) as f64 * self.per_hop_minutes;
        let changes = interchanges as f64 * self.per_interchange_minutes;
        // `as` saturates, and NaN becomes 0
        (hops + changes).max(0.0).round() as u32
    }
}
