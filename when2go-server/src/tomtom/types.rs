//! TomTom API response DTOs.
//!
//! These types map directly to the Search (geocode) and Routing
//! (calculateRoute) JSON responses. Only the fields the planner reads are
//! modelled; everything else is ignored. Fields are `Option` where TomTom
//! omits them rather than sending zero.

use serde::Deserialize;

/// Response from `GET /search/2/geocode/{query}.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    /// Matches, best first. Absent or empty when nothing matched.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// One geocoding match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub position: LatLon,
}

/// Position as returned by the Search API.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Response from `GET /routing/1/calculateRoute/{locations}/json`.
///
/// On failure TomTom sends an `error` object and no `routes` field.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRouteResponse {
    pub routes: Option<Vec<RouteDto>>,
    pub error: Option<ErrorDto>,
}

/// A single calculated route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    pub summary: RouteSummaryDto,

    /// Legs between consecutive locations; two locations give one leg.
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

/// Summary block of a route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummaryDto {
    pub length_in_meters: Option<u32>,
    pub travel_time_in_seconds: u32,
    pub traffic_delay_in_seconds: Option<u32>,
}

/// A route leg with its polyline.
#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    #[serde(default)]
    pub points: Vec<PointDto>,
}

/// Polyline point as returned by the Routing API.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Error object in a failed routing response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDto {
    pub description: Option<String>,
}
