//! Local stand-in for the TomTom Search and Routing APIs.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};

pub const API_KEY: &str = "test-key";

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub params: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Running stub server.
pub struct Stub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Stub {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn routing_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with("/routing/"))
            .collect()
    }

    pub fn geocode_requests(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path.starts_with("/search/"))
            .count()
    }
}

/// Start the stub on an ephemeral port.
///
/// Places: "Charminar" and "HITEC City" resolve, "Broken" fails with 500,
/// anything else has no match. Bicycle routing is refused; car routing
/// returns three routes with primary travel time 2400 s.
pub async fn spawn_stub() -> Stub {
    let state = StubState::default();
    let requests = Arc::clone(&state.requests);

    let app = Router::new()
        .route("/search/2/geocode/:query", get(geocode))
        .route("/routing/1/calculateRoute/:locations/json", get(calculate_route))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Stub {
        base_url: format!("http://{addr}"),
        requests,
    }
}

fn record(state: &StubState, path: String, params: &HashMap<String, String>) {
    state.requests.lock().unwrap().push(Recorded {
        path,
        params: params.clone(),
    });
}

async fn geocode(
    State(state): State<StubState>,
    Path(query): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, format!("/search/2/geocode/{query}"), &params);
    if params.get("key").map(String::as_str) != Some(API_KEY) {
        return StatusCode::FORBIDDEN.into_response();
    }

    let name = query.trim_end_matches(".json");
    let position = match name {
        "Charminar" => json!({ "lat": 17.3616, "lon": 78.4747 }),
        "HITEC City" => json!({ "lat": 17.4435, "lon": 78.3772 }),
        "Broken" => return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => return Json(json!({ "summary": { "numResults": 0 }, "results": [] })).into_response(),
    };
    Json(json!({ "results": [{ "type": "POI", "position": position }] })).into_response()
}

async fn calculate_route(
    State(state): State<StubState>,
    Path(locations): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, format!("/routing/1/calculateRoute/{locations}/json"), &params);

    if params.get("travelMode").map(String::as_str) == Some("bicycle") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "description": "travelMode bicycle is not supported with traffic" } })),
        )
            .into_response();
    }

    Json(json!({
        "formatVersion": "0.0.12",
        "routes": [
            route(2400, 600, 15_300),
            route(2100, 120, 17_900),
            route(2700, 1200, 14_200),
        ]
    }))
    .into_response()
}

fn route(travel: u32, delay: u32, length: u32) -> Value {
    json!({
        "summary": {
            "lengthInMeters": length,
            "travelTimeInSeconds": travel,
            "trafficDelayInSeconds": delay,
            "departureTime": "2026-10-17T12:01:00+00:00",
            "arrivalTime": "2026-10-17T12:41:00+00:00"
        },
        "legs": [{
            "points": [
                { "latitude": 17.3616, "longitude": 78.4747 },
                { "latitude": 17.40, "longitude": 78.43 },
                { "latitude": 17.4435, "longitude": 78.3772 }
            ]
        }]
    })
}
