//! The seam between the planner and the routing service.

use std::future::Future;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::domain::{Coordinate, Route, RoutePriority, TravelMode};

/// One routing request. Also the memoization key for route fetches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub mode: TravelMode,
    /// Departure instant; `None` means "now".
    pub depart_at: Option<DateTime<Utc>>,
    pub priority: RoutePriority,
}

impl RouteRequest {
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
        priority: RoutePriority,
    ) -> Self {
        Self {
            origin,
            destination,
            mode,
            depart_at: None,
            priority,
        }
    }

    /// Set the departure instant, truncated to the whole seconds sent upstream.
    pub fn departing_at(mut self, at: DateTime<Utc>) -> Self {
        self.depart_at = Some(at.trunc_subsecs(0));
        self
    }

    /// The same request with a different travel mode.
    pub fn with_mode(&self, mode: TravelMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// `departAt` query value: RFC 3339 with whole seconds.
    pub fn depart_at_param(&self) -> Option<String> {
        self.depart_at
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, false))
    }
}

/// Source of geocoding and routing answers.
///
/// Implementations absorb upstream failures: a failed geocode is `None`
/// and a failed route fetch is an empty list. This abstraction allows the
/// planner to be tested with mock data and to be wrapped by a cache.
pub trait RouteProvider: Send + Sync {
    /// First matching coordinate for a free-text location.
    fn geocode(&self, query: &str) -> impl Future<Output = Option<Coordinate>> + Send;

    /// Routes in provider preference order, possibly empty.
    fn routes(&self, request: &RouteRequest) -> impl Future<Output = Vec<Route>> + Send;
}
