//! Caching layer for routing service answers.
//!
//! Geocoding results change rarely and are kept for an hour. Route answers
//! carry live traffic and are kept for a minute, keyed by the full request
//! (coordinates, mode, departure instant, priority). Empty answers are
//! cached too, so a location the geocoder does not know is not looked up
//! again within the TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Coordinate, Route};
use crate::planner::{RouteProvider, RouteRequest};

/// Cached geocode answer, `None` for "no match".
type GeocodeEntry = Option<Coordinate>;

/// Cached route answer.
type RouteEntry = Arc<Vec<Route>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for geocode answers.
    pub geocode_ttl: Duration,

    /// TTL for route answers.
    pub route_ttl: Duration,

    /// Maximum number of entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            geocode_ttl: Duration::from_secs(3600),
            route_ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Route provider with memoization.
///
/// Wraps any `RouteProvider` and answers repeated questions from memory
/// while the entry is fresh.
pub struct CachedProvider<P> {
    inner: P,
    geocodes: MokaCache<String, GeocodeEntry>,
    routes: MokaCache<RouteRequest, RouteEntry>,
}

impl<P: RouteProvider> CachedProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let geocodes = MokaCache::builder()
            .time_to_live(config.geocode_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let routes = MokaCache::builder()
            .time_to_live(config.route_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            geocodes,
            routes,
        }
    }

    /// Access the wrapped provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.geocodes.invalidate_all();
        self.routes.invalidate_all();
    }
}

impl<P: RouteProvider> RouteProvider for CachedProvider<P> {
    async fn geocode(&self, query: &str) -> Option<Coordinate> {
        if let Some(cached) = self.geocodes.get(query).await {
            debug!(query, "geocode cache hit");
            return cached;
        }

        let found = self.inner.geocode(query).await;
        self.geocodes.insert(query.to_string(), found).await;
        found
    }

    async fn routes(&self, request: &RouteRequest) -> Vec<Route> {
        if let Some(cached) = self.routes.get(request).await {
            debug!(depart_at = ?request.depart_at, "route cache hit");
            return cached.as_ref().clone();
        }

        let routes = self.inner.routes(request).await;
        self.routes
            .insert(request.clone(), Arc::new(routes.clone()))
            .await;
        routes
    }
}
