//! Mock routing provider shared by planner and cache tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{Coordinate, Route, RouteSummary, TravelMode};

use super::provider::{RouteProvider, RouteRequest};

type RouteFn = Box<dyn Fn(&RouteRequest) -> Vec<Route> + Send + Sync>;

/// Route with the given travel time and delay (seconds) and a two-point line.
pub fn route(travel_secs: u32, delay_secs: u32) -> Route {
    Route::new(
        vec![Coordinate::new(17.36, 78.47), Coordinate::new(17.44, 78.35)],
        RouteSummary {
            travel_time_secs: travel_secs,
            traffic_delay_secs: delay_secs,
            length_meters: 10_000,
        },
    )
}

/// Provider answering from fixed tables and counting every call.
pub struct MockProvider {
    places: HashMap<String, Coordinate>,
    route_fn: RouteFn,
    geocode_calls: Mutex<usize>,
    route_requests: Mutex<Vec<RouteRequest>>,
}

impl MockProvider {
    /// Provider with no places and no routes.
    pub fn new() -> Self {
        Self {
            places: HashMap::new(),
            route_fn: Box::new(|_| Vec::new()),
            geocode_calls: Mutex::new(0),
            route_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_place(mut self, name: &str, at: Coordinate) -> Self {
        self.places.insert(name.to_string(), at);
        self
    }

    /// Answer route requests with `f`.
    pub fn with_routes(
        mut self,
        f: impl Fn(&RouteRequest) -> Vec<Route> + Send + Sync + 'static,
    ) -> Self {
        self.route_fn = Box::new(f);
        self
    }

    /// Only car requests get routes; bike requests get none.
    pub fn car_only(self, travel_secs: u32) -> Self {
        self.with_routes(move |req| match req.mode {
            TravelMode::Car => vec![route(travel_secs, 0)],
            TravelMode::Bike => Vec::new(),
        })
    }

    pub fn geocode_calls(&self) -> usize {
        *self.geocode_calls.lock().unwrap()
    }

    pub fn route_calls(&self) -> usize {
        self.route_requests.lock().unwrap().len()
    }

    pub fn route_requests(&self) -> Vec<RouteRequest> {
        self.route_requests.lock().unwrap().clone()
    }
}

impl RouteProvider for MockProvider {
    async fn geocode(&self, query: &str) -> Option<Coordinate> {
        *self.geocode_calls.lock().unwrap() += 1;
        self.places.get(query).copied()
    }

    async fn routes(&self, request: &RouteRequest) -> Vec<Route> {
        self.route_requests.lock().unwrap().push(request.clone());
        (self.route_fn)(request)
    }
}
