//! Per-browser dashboard sessions.
//!
//! A session holds the last form input, the last plan and the displayed
//! selection. Sessions live in memory and expire after 30 idle minutes;
//! the browser only holds a random id in a cookie.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, header};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use moka::future::Cache as MokaCache;

use crate::domain::{RoutePriority, TravelMode};
use crate::planner::{JourneyPlan, ScanConfig, Selection};

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "when2go_session";

/// Idle time after which a session is forgotten.
pub const SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

/// Length of an encoded id: 16 random bytes, unpadded base64url.
const ID_LEN: usize = 22;

/// Opaque session id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Fresh random id.
    pub fn generate() -> Self {
        let bytes: [u8; 16] = rand::random();
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Accept only values shaped like ids we issue.
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed = value.len() == ID_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        well_formed.then(|| Self(value.to_string()))
    }

    /// Session id from the request's `Cookie` headers, if present and valid.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Self::parse(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value for this id.
    pub fn cookie(&self) -> HeaderValue {
        let value = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.0,
            SESSION_IDLE.as_secs()
        );
        // base64url and the fixed attributes are all visible ASCII
        HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}

/// The dashboard form as last submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub start: String,
    pub end: String,
    pub mode: TravelMode,
    pub best_departure: bool,
    pub window: String,
    pub interval: String,
    pub priority: RoutePriority,
}

impl Default for FormState {
    fn default() -> Self {
        let scan = ScanConfig::default();
        Self {
            start: String::new(),
            end: String::new(),
            mode: TravelMode::default(),
            best_departure: false,
            window: scan.window_mins.to_string(),
            interval: scan.interval_mins.to_string(),
            priority: RoutePriority::default(),
        }
    }
}

/// State of one dashboard session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub form: FormState,
    pub plan: Option<Arc<JourneyPlan>>,
    pub selection: Option<Selection>,
    /// Message from the last failed lookup
    pub error: Option<String>,
}

impl Session {
    /// The plan and its (normalized) selection, if anything was planned.
    pub fn current(&self) -> Option<(&JourneyPlan, Selection)> {
        let plan = self.plan.as_deref()?;
        let selection = plan.normalize(self.selection.unwrap_or_else(|| plan.default_selection()));
        Some((plan, selection))
    }
}

/// In-memory session store with idle expiry.
#[derive(Clone)]
pub struct SessionStore {
    sessions: MokaCache<SessionId, Arc<Session>>,
}

impl SessionStore {
    pub fn new(idle: Duration, max_capacity: u64) -> Self {
        Self {
            sessions: MokaCache::builder()
                .time_to_idle(idle)
                .max_capacity(max_capacity)
                .build(),
        }
    }

    /// Session for `id`, or an empty one.
    pub async fn load(&self, id: Option<&SessionId>) -> Arc<Session> {
        match id {
            Some(id) => self.sessions.get(id).await.unwrap_or_default(),
            None => Arc::default(),
        }
    }

    /// Replace the session stored under `id`.
    pub async fn put(&self, id: SessionId, session: Session) {
        self.sessions.insert(id, Arc::new(session)).await;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SESSION_IDLE, 10_000)
    }
}
