//! TomTom HTTP client.
//!
//! Provides async methods for the Search (geocode) and Routing
//! (calculateRoute) APIs. Authentication is the `key` query parameter.
//! Nothing here retries; callers decide what a failure means.

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{Coordinate, Route};
use crate::planner::{RouteProvider, RouteRequest};

use super::convert::{convert_geocode, convert_routes};
use super::error::TomTomError;
use super::types::{CalculateRouteResponse, GeocodeResponse};

/// Default base URL for the TomTom APIs.
pub const DEFAULT_BASE_URL: &str = "https://api.tomtom.com";

/// Default number of alternatives requested besides the primary route.
pub const DEFAULT_MAX_ALTERNATIVES: u8 = 3;

/// Configuration for the TomTom client.
#[derive(Debug, Clone)]
pub struct TomTomConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production TomTom)
    pub base_url: String,
    /// `maxAlternatives` sent with every routing request
    pub max_alternatives: u8,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TomTomConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the number of alternative routes to request.
    pub fn with_max_alternatives(mut self, n: u8) -> Self {
        self.max_alternatives = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// TomTom Search/Routing API client.
#[derive(Debug, Clone)]
pub struct TomTomClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    max_alternatives: u8,
}

impl TomTomClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TomTomConfig) -> Result<Self, TomTomError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TomTomError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(TomTomError::InvalidUrl(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            max_alternatives: config.max_alternatives,
        })
    }

    /// Most routes a single routing request can yield (primary + alternatives).
    pub fn max_routes(&self) -> usize {
        usize::from(self.max_alternatives) + 1
    }

    /// Resolve a free-text location to its first matching coordinate.
    ///
    /// Returns `Ok(None)` when the search has no results.
    pub async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, TomTomError> {
        let url = self.endpoint(&["search", "2", "geocode", &format!("{query}.json")])?;

        let response: GeocodeResponse = self.get_json(url, &[]).await?;

        Ok(convert_geocode(&response))
    }

    /// Calculate routes with live traffic between two coordinates.
    ///
    /// Returns the primary route followed by up to `max_alternatives`
    /// alternatives, in provider order. A response without routes yields
    /// an empty list.
    pub async fn calculate_route(&self, request: &RouteRequest) -> Result<Vec<Route>, TomTomError> {
        let locations = format!(
            "{}:{}",
            request.origin.to_path_segment(),
            request.destination.to_path_segment()
        );
        let url = self.endpoint(&["routing", "1", "calculateRoute", &locations, "json"])?;

        let mut params = vec![
            ("traffic", "true".to_string()),
            ("routeType", request.priority.api_name().to_string()),
            ("travelMode", request.mode.api_name().to_string()),
            ("maxAlternatives", self.max_alternatives.to_string()),
        ];
        if let Some(depart_at) = request.depart_at_param() {
            params.push(("departAt", depart_at));
        }

        let response: CalculateRouteResponse = self.get_json(url, &params).await?;

        if let Some(error) = &response.error {
            debug!(
                description = error.description.as_deref().unwrap_or(""),
                "routing response carried an error"
            );
        }

        Ok(convert_routes(&response, self.max_routes()))
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TomTomError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TomTomError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON document, mapping status codes to errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, TomTomError> {
        debug!(path = url.path(), "TomTom request");

        let response = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TomTomError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TomTomError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TomTomError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TomTomError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl RouteProvider for TomTomClient {
    async fn geocode(&self, query: &str) -> Option<Coordinate> {
        match TomTomClient::geocode(self, query).await {
            Ok(found) => found,
            Err(e) => {
                warn!(query, error = %e, "geocoding failed; treating as not found");
                None
            }
        }
    }

    async fn routes(&self, request: &RouteRequest) -> Vec<Route> {
        match self.calculate_route(request).await {
            Ok(routes) => routes,
            Err(e) => {
                warn!(
                    mode = request.mode.as_str(),
                    priority = request.priority.as_str(),
                    error = %e,
                    "routing failed; treating as no routes"
                );
                Vec::new()
            }
        }
    }
}
