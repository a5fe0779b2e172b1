//! Conversion from TomTom DTOs to domain types.

use crate::domain::{Coordinate, Route, RouteSummary};

use super::types::{CalculateRouteResponse, GeocodeResponse, RouteDto};

/// First geocoding match, if any.
pub fn convert_geocode(response: &GeocodeResponse) -> Option<Coordinate> {
    response
        .results
        .first()
        .map(|r| Coordinate::new(r.position.lat, r.position.lon))
}

/// Routes in provider order, at most `max_routes` of them.
///
/// A response without a `routes` field yields an empty list.
pub fn convert_routes(response: &CalculateRouteResponse, max_routes: usize) -> Vec<Route> {
    response
        .routes
        .as_deref()
        .unwrap_or_default()
        .iter()
        .take(max_routes)
        .map(convert_route)
        .collect()
}

/// Convert one route, concatenating the points of every leg.
pub fn convert_route(dto: &RouteDto) -> Route {
    let points = dto
        .legs
        .iter()
        .flat_map(|leg| leg.points.iter())
        .map(|p| Coordinate::new(p.latitude, p.longitude))
        .collect();

    let summary = RouteSummary {
        travel_time_secs: dto.summary.travel_time_in_seconds,
        traffic_delay_secs: dto.summary.traffic_delay_in_seconds.unwrap_or(0),
        length_meters: dto.summary.length_in_meters.unwrap_or(0),
    };

    Route::new(points, summary)
}
