//! Routes returned by the routing API.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// Per-route summary figures.
///
/// All quantities are unsigned, so non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Predicted travel time including traffic.
    pub travel_time_secs: u32,
    /// Portion of the travel time caused by traffic.
    pub traffic_delay_secs: u32,
    /// Route length.
    pub length_meters: u32,
}

impl RouteSummary {
    pub fn travel_time(&self) -> Duration {
        Duration::seconds(i64::from(self.travel_time_secs))
    }

    /// Whole minutes of travel time (rounded down).
    pub fn travel_time_mins(&self) -> u32 {
        self.travel_time_secs / 60
    }

    /// Whole minutes of traffic delay (rounded down).
    pub fn traffic_delay_mins(&self) -> u32 {
        self.traffic_delay_secs / 60
    }

    pub fn length_km(&self) -> f64 {
        f64::from(self.length_meters) / 1000.0
    }
}

/// One candidate route: polyline plus summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub points: Vec<Coordinate>,
    pub summary: RouteSummary,
}

impl Route {
    pub fn new(points: Vec<Coordinate>, summary: RouteSummary) -> Self {
        Self { points, summary }
    }
}
