//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::DisplayZone;
use crate::history::HistoryLog;
use crate::planner::RouteProvider;

use super::session::SessionStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests. Generic over the
/// routing provider so handlers can be exercised against a mock.
pub struct AppState<P> {
    /// Routing provider (the cached TomTom client in production)
    pub provider: Arc<P>,

    /// History log appended on every completed lookup
    pub history: Arc<HistoryLog>,

    /// Zone for displayed clock times
    pub zone: DisplayZone,

    /// Dashboard sessions
    pub sessions: SessionStore,
}

impl<P: RouteProvider> AppState<P> {
    /// Create a new app state.
    pub fn new(provider: P, history: HistoryLog, zone: DisplayZone) -> Self {
        Self {
            provider: Arc::new(provider),
            history: Arc::new(history),
            zone,
            sessions: SessionStore::default(),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            history: Arc::clone(&self.history),
            zone: self.zone,
            sessions: self.sessions.clone(),
        }
    }
}
