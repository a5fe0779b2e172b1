//! TomTom client against a local stub server.

mod common;

use chrono::{TimeZone, Utc};

use when2go_server::domain::{Coordinate, RoutePriority, TravelMode};
use when2go_server::planner::{RouteProvider, RouteRequest};
use when2go_server::tomtom::{TomTomClient, TomTomConfig, TomTomError};

fn client(base_url: &str) -> TomTomClient {
    TomTomClient::new(TomTomConfig::new(common::API_KEY).with_base_url(base_url)).unwrap()
}

fn charminar() -> Coordinate {
    Coordinate::new(17.3616, 78.4747)
}

fn hitec_city() -> Coordinate {
    Coordinate::new(17.4435, 78.3772)
}

#[tokio::test]
async fn geocode_resolves_first_match() {
    let stub = common::spawn_stub().await;

    let found = client(&stub.base_url).geocode("HITEC City").await.unwrap();

    assert_eq!(found, Some(hitec_city()));
    let requests = stub.requests();
    assert_eq!(requests[0].params.get("key").map(String::as_str), Some(common::API_KEY));
}

#[tokio::test]
async fn geocode_without_results_is_none() {
    let stub = common::spawn_stub().await;

    assert_eq!(client(&stub.base_url).geocode("Atlantis").await.unwrap(), None);
}

#[tokio::test]
async fn geocode_server_error_is_reported() {
    let stub = common::spawn_stub().await;

    let err = client(&stub.base_url).geocode("Broken").await.unwrap_err();

    assert!(matches!(err, TomTomError::ApiError { status: 500, .. }));
}

#[tokio::test]
async fn wrong_key_is_unauthorized() {
    let stub = common::spawn_stub().await;
    let client = TomTomClient::new(TomTomConfig::new("nope").with_base_url(&stub.base_url)).unwrap();

    let err = client.geocode("Charminar").await.unwrap_err();

    assert!(matches!(err, TomTomError::Unauthorized));
    // Through the provider trait a failure reads as "not found"
    assert_eq!(RouteProvider::geocode(&client, "Charminar").await, None);
}

#[tokio::test]
async fn routing_sends_traffic_mode_priority_and_departure() {
    let stub = common::spawn_stub().await;
    let depart_at = Utc.with_ymd_and_hms(2026, 10, 17, 12, 1, 0).unwrap();
    let request = RouteRequest::new(charminar(), hitec_city(), TravelMode::Car, RoutePriority::Eco)
        .departing_at(depart_at);

    let routes = client(&stub.base_url).calculate_route(&request).await.unwrap();

    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0].summary.travel_time_secs, 2400);
    assert_eq!(routes[0].summary.traffic_delay_secs, 600);
    assert_eq!(routes[1].summary.length_meters, 17_900);
    assert_eq!(routes[0].points.len(), 3);

    let sent = &stub.routing_requests()[0];
    assert_eq!(sent.params.get("traffic").map(String::as_str), Some("true"));
    assert_eq!(sent.params.get("travelMode").map(String::as_str), Some("car"));
    assert_eq!(sent.params.get("routeType").map(String::as_str), Some("eco"));
    assert_eq!(sent.params.get("maxAlternatives").map(String::as_str), Some("3"));
    assert!(sent.params.contains_key("departAt"));
}

#[tokio::test]
async fn alternatives_are_capped() {
    let stub = common::spawn_stub().await;
    let client = TomTomClient::new(
        TomTomConfig::new(common::API_KEY)
            .with_base_url(&stub.base_url)
            .with_max_alternatives(1),
    )
    .unwrap();
    let request = RouteRequest::new(charminar(), hitec_city(), TravelMode::Car, RoutePriority::Fastest);

    let routes = client.calculate_route(&request).await.unwrap();

    assert_eq!(routes.len(), 2);
    assert!(!stub.routing_requests()[0].params.contains_key("departAt"));
}

#[tokio::test]
async fn refused_mode_yields_no_routes_through_provider() {
    let stub = common::spawn_stub().await;
    let client = client(&stub.base_url);
    let request = RouteRequest::new(charminar(), hitec_city(), TravelMode::Bike, RoutePriority::Fastest);

    assert!(matches!(
        client.calculate_route(&request).await,
        Err(TomTomError::ApiError { status: 400, .. })
    ));
    assert!(RouteProvider::routes(&client, &request).await.is_empty());
    assert_eq!(
        stub.routing_requests()[0].params.get("travelMode").map(String::as_str),
        Some("bicycle")
    );
}
