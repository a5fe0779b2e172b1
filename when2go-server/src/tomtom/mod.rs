//! TomTom Search and Routing client.
//!
//! This module provides an HTTP client for the TomTom web APIs used by the
//! planner: free-text geocoding and traffic-aware route calculation.
//!
//! Key characteristics of TomTom routing:
//! - Locations are `lat,lon` pairs joined by `:` in the request path
//! - `departAt` is RFC 3339; omitting it means "leave now"
//! - The first returned route is the provider's recommendation; any
//!   further routes are alternatives in provider order
//! - Route geometry is split into legs whose points are concatenated

mod client;
mod convert;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MAX_ALTERNATIVES, TomTomClient, TomTomConfig};
pub use convert::{convert_geocode, convert_route, convert_routes};
pub use error::TomTomError;
pub use types::{
    CalculateRouteResponse, ErrorDto, GeocodeResponse, GeocodeResult, LatLon, LegDto, PointDto,
    RouteDto, RouteSummaryDto,
};
