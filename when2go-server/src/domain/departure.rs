//! Departure options: a departure instant with the routes fetched for it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::route::Route;

/// Routes evaluated for one departure instant.
///
/// The route set is never empty; the first route is the provider's top
/// recommendation (the primary route).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureOption {
    depart_at: DateTime<Utc>,
    routes: Vec<Route>,
}

impl DepartureOption {
    /// Create an option, or `None` if no routes were returned.
    pub fn new(depart_at: DateTime<Utc>, routes: Vec<Route>) -> Option<Self> {
        if routes.is_empty() {
            return None;
        }
        Some(Self { depart_at, routes })
    }

    pub fn depart_at(&self) -> DateTime<Utc> {
        self.depart_at
    }

    /// All alternatives in provider order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn primary(&self) -> &Route {
        &self.routes[0]
    }

    /// Alternative `index`, if it exists.
    pub fn alternative(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn alternative_count(&self) -> usize {
        self.routes.len()
    }

    pub fn primary_travel_time_secs(&self) -> u32 {
        self.primary().summary.travel_time_secs
    }

    pub fn primary_traffic_delay_secs(&self) -> u32 {
        self.primary().summary.traffic_delay_secs
    }

    /// Arrival instant when taking the primary route.
    pub fn arrival_at(&self) -> DateTime<Utc> {
        self.arrival_via(0)
    }

    /// Arrival instant when taking alternative `index` (primary if out of range).
    pub fn arrival_via(&self, index: usize) -> DateTime<Utc> {
        let route = self.alternative(index).unwrap_or_else(|| self.primary());
        self.depart_at + route.summary.travel_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteSummary;
    use chrono::{Duration, TimeZone};

    fn route(travel: u32) -> Route {
        Route::new(
            vec![],
            RouteSummary {
                travel_time_secs: travel,
                traffic_delay_secs: 0,
                length_meters: 1000,
            },
        )
    }

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 4, 30, 0).unwrap()
    }

    #[test]
    fn empty_route_set_rejected() {
        assert!(DepartureOption::new(instant(), vec![]).is_none());
    }

    #[test]
    fn primary_is_first() {
        let option = DepartureOption::new(instant(), vec![route(900), route(600)]).unwrap();
        assert_eq!(option.primary_travel_time_secs(), 900);
        assert_eq!(option.alternative_count(), 2);
    }

    #[test]
    fn arrival_uses_primary() {
        let option = DepartureOption::new(instant(), vec![route(900), route(600)]).unwrap();
        assert_eq!(option.arrival_at(), instant() + Duration::minutes(15));
        assert_eq!(option.arrival_via(1), instant() + Duration::minutes(10));
        assert_eq!(option.arrival_via(7), instant() + Duration::minutes(15));
    }
}
