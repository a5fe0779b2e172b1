//! Web layer for the departure planner.
//!
//! Serves the dashboard (form, map, cards and charts) with per-browser
//! sessions, plus a small JSON API for planning and history.

mod dto;
mod routes;
mod session;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use session::{FormState, SESSION_COOKIE, SESSION_IDLE, Session, SessionId, SessionStore};
pub use state::AppState;
pub use templates::*;
