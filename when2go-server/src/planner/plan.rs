//! Journey planning: geocoding, departure search and mode fallback.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{Coordinate, DepartureOption, Route, RoutePriority, TravelMode};

use super::config::ScanConfig;
use super::provider::{RouteProvider, RouteRequest};
use super::scan::{ScanError, ScanOutcome, find_best_departure};

/// Which end of the journey failed to geocode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("destination"),
        }
    }
}

/// Error from journey planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Start or end location was blank
    #[error("please enter both start and destination locations")]
    MissingLocation,

    /// Geocoder had no match for a location
    #[error("could not geocode {which} location '{query}'")]
    LocationNotFound { which: Endpoint, query: String },

    /// Scan found no route at any sampled instant, even after fallback
    #[error("no routes found in the {window_mins}-minute window; try adjusting the window or locations")]
    NoRouteInWindow { window_mins: u32 },

    /// Single "now" lookup returned no routes, even after fallback
    #[error("no routes found")]
    NoRoutes,
}

impl From<ScanError> for PlanError {
    fn from(e: ScanError) -> Self {
        match e {
            ScanError::NoRouteInWindow { window_mins } => PlanError::NoRouteInWindow { window_mins },
        }
    }
}

/// Whether to scan a window of departures or just leave now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartureSearch {
    Now,
    Window(ScanConfig),
}

/// A planning request as entered by the traveller.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyRequest {
    pub start: String,
    pub end: String,
    pub mode: TravelMode,
    pub priority: RoutePriority,
    pub search: DepartureSearch,
}

impl JourneyRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            mode: TravelMode::default(),
            priority: RoutePriority::default(),
            search: DepartureSearch::Now,
        }
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_priority(mut self, priority: RoutePriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_window(mut self, config: ScanConfig) -> Self {
        self.search = DepartureSearch::Window(config);
        self
    }
}

/// Index of the displayed departure option and of its displayed alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub departure: usize,
    pub alternative: usize,
}

/// The outcome of planning a journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyPlan {
    pub start: String,
    pub end: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub requested_mode: TravelMode,
    /// Mode the routes were actually computed with.
    pub used_mode: TravelMode,
    pub priority: RoutePriority,
    /// Whether a departure window was scanned (as opposed to "now").
    pub scanned: bool,
    options: Vec<DepartureOption>,
    best: usize,
}

impl JourneyPlan {
    /// Whether routes were computed with the fallback mode.
    pub fn fell_back(&self) -> bool {
        self.used_mode != self.requested_mode
    }

    /// Departure options in time order.
    pub fn options(&self) -> &[DepartureOption] {
        &self.options
    }

    pub fn best_index(&self) -> usize {
        self.best
    }

    pub fn best(&self) -> &DepartureOption {
        &self.options[self.best]
    }

    pub fn option(&self, index: usize) -> Option<&DepartureOption> {
        self.options.get(index)
    }

    /// Selection shown right after planning: best departure, primary route.
    pub fn default_selection(&self) -> Selection {
        Selection {
            departure: self.best,
            alternative: 0,
        }
    }

    /// Change the displayed departure. Resets the alternative to the
    /// primary route; an out-of-range index keeps `current`.
    pub fn select_departure(&self, current: Selection, departure: usize) -> Selection {
        if departure < self.options.len() {
            Selection {
                departure,
                alternative: 0,
            }
        } else {
            self.normalize(current)
        }
    }

    /// Change the displayed alternative of the current departure.
    /// An out-of-range index falls back to the primary route.
    pub fn select_alternative(&self, current: Selection, alternative: usize) -> Selection {
        let departure = self.normalize(current).departure;
        self.normalize(Selection {
            departure,
            alternative,
        })
    }

    /// Clamp a selection so both indices are valid.
    pub fn normalize(&self, selection: Selection) -> Selection {
        let departure = if selection.departure < self.options.len() {
            selection.departure
        } else {
            self.best
        };
        let count = self.options[departure].alternative_count();
        let alternative = if selection.alternative < count {
            selection.alternative
        } else {
            0
        };
        Selection {
            departure,
            alternative,
        }
    }

    /// The option and route a (normalized) selection points at.
    pub fn selected(&self, selection: Selection) -> (&DepartureOption, &Route) {
        let selection = self.normalize(selection);
        let option = &self.options[selection.departure];
        (option, &option.routes()[selection.alternative])
    }
}

/// Plan a journey.
///
/// Geocodes both locations, then either scans the departure window or
/// looks up routes for leaving now. A non-default mode that yields nothing
/// is retried once with the default mode; the plan records the fallback.
pub async fn plan_journey<P: RouteProvider>(
    provider: &P,
    request: &JourneyRequest,
    now: DateTime<Utc>,
) -> Result<JourneyPlan, PlanError> {
    let start = request.start.trim();
    let end = request.end.trim();
    if start.is_empty() || end.is_empty() {
        return Err(PlanError::MissingLocation);
    }

    let origin = provider
        .geocode(start)
        .await
        .ok_or_else(|| PlanError::LocationNotFound {
            which: Endpoint::Start,
            query: start.to_string(),
        })?;
    let destination = provider
        .geocode(end)
        .await
        .ok_or_else(|| PlanError::LocationNotFound {
            which: Endpoint::End,
            query: end.to_string(),
        })?;

    let base = RouteRequest::new(origin, destination, request.mode, request.priority);

    let (options, best, used_mode) = match request.search {
        DepartureSearch::Window(config) => {
            let (outcome, used_mode) = scan_with_fallback(provider, &base, &config, now).await?;
            let (options, best) = outcome.into_parts();
            (options, best, used_mode)
        }
        DepartureSearch::Now => {
            let (option, used_mode) = fetch_now_with_fallback(provider, &base, now).await?;
            (vec![option], 0, used_mode)
        }
    };

    let plan = JourneyPlan {
        start: start.to_string(),
        end: end.to_string(),
        origin,
        destination,
        requested_mode: request.mode,
        used_mode,
        priority: request.priority,
        scanned: matches!(request.search, DepartureSearch::Window(_)),
        options,
        best,
    };

    info!(
        start = %plan.start,
        end = %plan.end,
        mode = plan.used_mode.as_str(),
        fell_back = plan.fell_back(),
        options = plan.options.len(),
        best_travel_secs = plan.best().primary_travel_time_secs(),
        "journey planned"
    );

    Ok(plan)
}

async fn scan_with_fallback<P: RouteProvider>(
    provider: &P,
    base: &RouteRequest,
    config: &ScanConfig,
    now: DateTime<Utc>,
) -> Result<(ScanOutcome, TravelMode), PlanError> {
    match find_best_departure(provider, base, config, now).await {
        Ok(outcome) => Ok((outcome, base.mode)),
        Err(e) if base.mode.is_default() => Err(e.into()),
        Err(_) => {
            let fallback = TravelMode::default();
            warn!(
                requested = base.mode.as_str(),
                fallback = fallback.as_str(),
                "no route in window for requested mode; falling back"
            );
            let outcome =
                find_best_departure(provider, &base.with_mode(fallback), config, now).await?;
            Ok((outcome, fallback))
        }
    }
}

async fn fetch_now_with_fallback<P: RouteProvider>(
    provider: &P,
    base: &RouteRequest,
    now: DateTime<Utc>,
) -> Result<(DepartureOption, TravelMode), PlanError> {
    // No departAt: the service plans for the moment it receives the request
    let request = base.clone();
    if let Some(option) = DepartureOption::new(now, provider.routes(&request).await) {
        return Ok((option, base.mode));
    }
    if base.mode.is_default() {
        return Err(PlanError::NoRoutes);
    }

    let fallback = TravelMode::default();
    warn!(
        requested = base.mode.as_str(),
        fallback = fallback.as_str(),
        "no route for requested mode; falling back"
    );
    let routes = provider.routes(&request.with_mode(fallback)).await;
    DepartureOption::new(now, routes)
        .map(|option| (option, fallback))
        .ok_or(PlanError::NoRoutes)
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
