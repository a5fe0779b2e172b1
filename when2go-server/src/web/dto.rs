//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, DepartureOption, DisplayZone, Route, RoutePriority, TrafficLevel, TravelMode};
use crate::history::{DelayPoint, HistoryRecord, HourlyAverage};
use crate::planner::JourneyPlan;

/// Dashboard form submission.
///
/// Everything arrives as text so malformed numbers can be reported back
/// instead of rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanForm {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub mode: String,
    /// Checkbox: present ("on") when ticked
    pub best_departure: Option<String>,
    #[serde(default)]
    pub window: String,
    #[serde(default)]
    pub interval: String,
    #[serde(default)]
    pub priority: String,
}

/// Selection change from a card button.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectQuery {
    pub departure: Option<String>,
    pub alternative: Option<String>,
}

/// Query for the JSON planning API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanQuery {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    pub mode: Option<String>,
    pub priority: Option<String>,
    /// Scan a window when given; otherwise leave now
    pub window: Option<u32>,
    pub interval: Option<u32>,
}

/// Query for the JSON history API.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    pub start: String,
    pub end: String,
}

/// A route in a planning response.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub travel_time_min: u32,
    pub traffic_delay_min: u32,
    pub length_km: f64,
    pub traffic: TrafficLevel,
    /// Polyline as `[lat, lon]` pairs
    pub points: Vec<[f64; 2]>,
}

impl RouteResult {
    pub fn from_route(route: &Route) -> Self {
        Self {
            travel_time_min: route.summary.travel_time_mins(),
            traffic_delay_min: route.summary.traffic_delay_mins(),
            length_km: route.summary.length_km(),
            traffic: TrafficLevel::from_delay_secs(route.summary.traffic_delay_secs),
            points: route.points.iter().map(Coordinate::to_lat_lon).collect(),
        }
    }
}

/// A departure option in a planning response.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    /// RFC 3339, UTC
    pub depart_at: String,
    /// Clock time in the display zone
    pub depart_at_local: String,
    pub arrival_local: String,
    pub routes: Vec<RouteResult>,
}

impl DepartureResult {
    pub fn from_option(option: &DepartureOption, zone: &DisplayZone) -> Self {
        Self {
            depart_at: option.depart_at().to_rfc3339(),
            depart_at_local: zone.clock_12h(option.depart_at()),
            arrival_local: zone.clock_12h(option.arrival_at()),
            routes: option.routes().iter().map(RouteResult::from_route).collect(),
        }
    }
}

/// Response from the planning API.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub start: String,
    pub end: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub requested_mode: TravelMode,
    pub used_mode: TravelMode,
    pub fell_back: bool,
    pub priority: RoutePriority,
    pub scanned: bool,
    /// Index into `options` of the quickest departure
    pub best_index: usize,
    pub options: Vec<DepartureResult>,
}

impl PlanResponse {
    pub fn from_plan(plan: &JourneyPlan, zone: &DisplayZone) -> Self {
        Self {
            start: plan.start.clone(),
            end: plan.end.clone(),
            origin: plan.origin,
            destination: plan.destination,
            requested_mode: plan.requested_mode,
            used_mode: plan.used_mode,
            fell_back: plan.fell_back(),
            priority: plan.priority,
            scanned: plan.scanned,
            best_index: plan.best_index(),
            options: plan
                .options()
                .iter()
                .map(|o| DepartureResult::from_option(o, zone))
                .collect(),
        }
    }
}

/// Response from the history API.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<HistoryRecord>,
    pub hourly: Vec<HourlyAverage>,
    pub delays: Vec<DelayPoint>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
