//! Domain types for the departure planner.
//!
//! Coordinates, routes and departure options as returned by the routing
//! service, plus the small vocabulary (travel mode, route priority, traffic
//! level, display time zone) used throughout the planner and presentation.

mod clock;
mod coordinate;
mod departure;
mod error;
mod mode;
mod route;
mod traffic;

pub use clock::{CLOCK_12H, CLOCK_24H, DisplayZone, TIMESTAMP, parse_clock_12h};
pub use coordinate::Coordinate;
pub use departure::DepartureOption;
pub use error::DomainError;
pub use mode::{RoutePriority, TravelMode};
pub use route::{Route, RouteSummary};
pub use traffic::TrafficLevel;
