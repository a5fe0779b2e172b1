//! Departure planner.
//!
//! This module answers: "when should I leave to spend the least time on
//! the road?" It geocodes the two ends of a journey, samples departure
//! instants across a window, and keeps the one whose primary route is
//! quickest. When the requested mode yields nothing it retries by car.

mod config;
mod plan;
mod provider;
mod scan;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{
    MAX_INTERVAL_MINS, MAX_WINDOW_MINS, MIN_INTERVAL_MINS, MIN_WINDOW_MINS, ScanConfig,
    ScanConfigError,
};
pub use plan::{
    DepartureSearch, Endpoint, JourneyPlan, JourneyRequest, PlanError, Selection, plan_journey,
};
pub use provider::{RouteProvider, RouteRequest};
pub use scan::{ScanError, ScanOutcome, find_best_departure, sample_instants, select_best};
