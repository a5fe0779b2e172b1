//! Best-departure scan.
//!
//! Samples departure instants across a window at a fixed interval, fetches
//! routes for each one in turn and keeps the instant whose primary route is
//! quickest. Requests are issued sequentially; an instant that yields no
//! routes is skipped rather than counted as a zero-length trip.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::domain::DepartureOption;

use super::config::ScanConfig;
use super::provider::{RouteProvider, RouteRequest};

/// Error from a departure scan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// Every sampled instant came back without routes
    #[error("no route found in the {window_mins}-minute window")]
    NoRouteInWindow { window_mins: u32 },
}

/// All departure options found by a scan, in time order, and the best one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    options: Vec<DepartureOption>,
    best: usize,
}

impl ScanOutcome {
    /// Build an outcome from options in time order.
    ///
    /// Returns `None` when there are no options.
    pub fn from_options(options: Vec<DepartureOption>) -> Option<Self> {
        let best = select_best(&options)?;
        Some(Self { options, best })
    }

    pub fn options(&self) -> &[DepartureOption] {
        &self.options
    }

    pub fn best_index(&self) -> usize {
        self.best
    }

    pub fn best(&self) -> &DepartureOption {
        &self.options[self.best]
    }

    pub fn into_parts(self) -> (Vec<DepartureOption>, usize) {
        (self.options, self.best)
    }
}

/// Departure instants to sample: `start + lead + k * interval` for
/// `k = 0..=floor(window / interval)`.
pub fn sample_instants(
    start: DateTime<Utc>,
    config: &ScanConfig,
) -> impl Iterator<Item = DateTime<Utc>> + use<> {
    let config = *config;
    (0..config.sample_count()).map(move |k| start + config.offset(k))
}

/// Index of the option with the smallest primary travel time.
///
/// Only a strictly smaller time replaces the incumbent, so on a tie the
/// earliest option wins.
pub fn select_best(options: &[DepartureOption]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, option) in options.iter().enumerate() {
        let secs = option.primary_travel_time_secs();
        match best {
            Some((_, best_secs)) if secs >= best_secs => {}
            _ => best = Some((i, secs)),
        }
    }
    best.map(|(i, _)| i)
}

/// Scan the window for the quickest departure.
///
/// `base` supplies origin, destination, mode and priority; its departure
/// instant is replaced by each sampled instant.
pub async fn find_best_departure<P: RouteProvider>(
    provider: &P,
    base: &RouteRequest,
    config: &ScanConfig,
    now: DateTime<Utc>,
) -> Result<ScanOutcome, ScanError> {
    let mut options = Vec::new();

    for depart_at in sample_instants(now, config) {
        let request = base.clone().departing_at(depart_at);
        let routes = provider.routes(&request).await;

        match DepartureOption::new(depart_at, routes) {
            Some(option) => {
                debug!(
                    %depart_at,
                    travel_secs = option.primary_travel_time_secs(),
                    alternatives = option.alternative_count(),
                    "sampled departure"
                );
                options.push(option);
            }
            None => debug!(%depart_at, "no routes for sampled departure; skipping"),
        }
    }

    ScanOutcome::from_options(options).ok_or(ScanError::NoRouteInWindow {
        window_mins: config.window_mins,
    })
}
