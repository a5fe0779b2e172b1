//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::Utc;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::domain::{RoutePriority, TravelMode};
use crate::history::{HistoryError, HistoryRecord, delay_trend, hourly_averages};
use crate::planner::{
    JourneyPlan, JourneyRequest, PlanError, RouteProvider, ScanConfig, Selection, plan_journey,
};
use crate::render::{RenderError, dashboard_map, placeholder_map, render_map};

use super::dto::*;
use super::session::{FormState, Session, SessionId};
use super::state::AppState;
use super::templates::DashboardTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<P: RouteProvider + 'static>(state: AppState<P>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(dashboard::<P>))
        .route("/plan", post(submit_plan::<P>))
        .route("/select", get(select::<P>))
        .route("/map", get(map_page::<P>))
        .route("/api/plan", get(api_plan::<P>))
        .route("/api/history", get(api_history::<P>))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Dashboard page for the caller's session.
async fn dashboard<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let id = SessionId::from_headers(&headers);
    let session = state.sessions.load(id.as_ref()).await;

    let history = match session.current() {
        Some((plan, _)) => Some(state.history.load_for_route(&plan.start, &plan.end)?),
        None => None,
    };

    let template = DashboardTemplate::for_session(&session, history.as_deref(), &state.zone)?;
    let html = template.render().map_err(RenderError::from)?;
    Ok(Html(html))
}

/// Form submit: plan, store the result in the session, save history.
async fn submit_plan<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Form(form): Form<PlanForm>,
) -> Response {
    let id = SessionId::from_headers(&headers).unwrap_or_else(SessionId::generate);
    let form_state = form_state(&form);

    let outcome = match journey_request(&form) {
        Ok(request) => plan_journey(state.provider.as_ref(), &request, Utc::now())
            .await
            .map_err(AppError::from),
        Err(e) => Err(e),
    };

    let session = match outcome {
        Ok(plan) => {
            let selection = plan.default_selection();
            save_history(&state, &plan, selection);
            Session {
                form: form_state,
                plan: Some(Arc::new(plan)),
                selection: Some(selection),
                error: None,
            }
        }
        Err(e) => {
            info!(error = %e.message(), "lookup failed");
            Session {
                form: form_state,
                plan: None,
                selection: None,
                error: Some(e.message().to_string()),
            }
        }
    };

    state.sessions.put(id.clone(), session).await;
    redirect_home(&id)
}

/// Change the displayed departure and/or alternative.
///
/// A malformed departure index keeps the current departure; a malformed
/// alternative index shows the primary route.
async fn select<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Query(query): Query<SelectQuery>,
) -> Response {
    let Some(id) = SessionId::from_headers(&headers) else {
        return Redirect::to("/").into_response();
    };
    let session = state.sessions.load(Some(&id)).await;
    let Some((plan, current)) = session.current() else {
        return redirect_home(&id);
    };

    let next = apply_selection(plan, current, &query);
    if next != current {
        save_history(&state, plan, next);
        let updated = Session {
            selection: Some(next),
            ..Session::clone(&session)
        };
        state.sessions.put(id.clone(), updated).await;
    }
    redirect_home(&id)
}

/// Map page for the session's selection (shown in an iframe).
async fn map_page<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let id = SessionId::from_headers(&headers);
    let session = state.sessions.load(id.as_ref()).await;

    let view = match session.current() {
        Some((plan, selection)) => dashboard_map(plan, selection),
        None => placeholder_map(),
    };
    Ok(Html(render_map(&view, "when2go map")?))
}

/// Plan a journey and return JSON.
async fn api_plan<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    Query(query): Query<PlanQuery>,
) -> Result<Json<PlanResponse>, AppError> {
    let mut request = JourneyRequest::new(&query.start, &query.end);
    if let Some(mode) = &query.mode {
        request = request.with_mode(mode.parse::<TravelMode>().map_err(AppError::bad_request)?);
    }
    if let Some(priority) = &query.priority {
        request = request.with_priority(
            priority
                .parse::<RoutePriority>()
                .map_err(AppError::bad_request)?,
        );
    }
    if let Some(window) = query.window {
        let interval = query.interval.unwrap_or(ScanConfig::default().interval_mins);
        request = request.with_window(ScanConfig::bounded(window, interval).map_err(AppError::bad_request)?);
    }

    let plan = plan_journey(state.provider.as_ref(), &request, Utc::now()).await?;
    save_history(&state, &plan, plan.default_selection());

    Ok(Json(PlanResponse::from_plan(&plan, &state.zone)))
}

/// Saved journeys for a route, with the chart aggregations.
async fn api_history<P: RouteProvider + 'static>(
    State(state): State<AppState<P>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let records = state.history.load_for_route(&query.start, &query.end)?;
    Ok(Json(HistoryResponse {
        hourly: hourly_averages(&records),
        delays: delay_trend(&records),
        records,
    }))
}

/// Form values kept for redisplay. Unknown choices fall back to defaults.
fn form_state(form: &PlanForm) -> FormState {
    let defaults = FormState::default();
    FormState {
        start: form.start.clone(),
        end: form.end.clone(),
        mode: form.mode.parse().unwrap_or(defaults.mode),
        best_departure: form.best_departure.is_some(),
        window: if form.window.trim().is_empty() {
            defaults.window
        } else {
            form.window.clone()
        },
        interval: if form.interval.trim().is_empty() {
            defaults.interval
        } else {
            form.interval.clone()
        },
        priority: form.priority.parse().unwrap_or(defaults.priority),
    }
}

/// Validate a form submission into a planning request.
fn journey_request(form: &PlanForm) -> Result<JourneyRequest, AppError> {
    let mode = match form.mode.trim() {
        "" => TravelMode::default(),
        m => m.parse().map_err(AppError::bad_request)?,
    };
    let priority = match form.priority.trim() {
        "" => RoutePriority::default(),
        p => p.parse().map_err(AppError::bad_request)?,
    };

    let mut request = JourneyRequest::new(&form.start, &form.end)
        .with_mode(mode)
        .with_priority(priority);

    if form.best_departure.is_some() {
        let defaults = ScanConfig::default();
        let window = parse_minutes("window", &form.window, defaults.window_mins)?;
        let interval = parse_minutes("interval", &form.interval, defaults.interval_mins)?;
        request = request.with_window(ScanConfig::bounded(window, interval).map_err(AppError::bad_request)?);
    }
    Ok(request)
}

fn parse_minutes(field: &str, raw: &str, default: u32) -> Result<u32, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse().map_err(|_| AppError::BadRequest {
        message: format!("{field} must be a whole number of minutes, got '{raw}'"),
    })
}

fn apply_selection(plan: &JourneyPlan, current: Selection, query: &SelectQuery) -> Selection {
    let mut next = current;
    if let Some(raw) = &query.departure {
        if let Ok(departure) = raw.trim().parse::<usize>() {
            next = plan.select_departure(next, departure);
        }
    }
    if let Some(raw) = &query.alternative {
        let alternative = raw.trim().parse::<usize>().unwrap_or(0);
        next = plan.select_alternative(next, alternative);
    }
    next
}

/// Append the selected route to history. Failures are logged, not fatal.
fn save_history<P>(state: &AppState<P>, plan: &JourneyPlan, selection: Selection) {
    let record = HistoryRecord::from_selection(plan, selection, &state.zone, Utc::now());
    if let Err(e) = state.history.append(&record) {
        warn!(error = %e, "could not save journey to history");
    }
}

fn redirect_home(id: &SessionId) -> Response {
    ([(header::SET_COOKIE, id.cookie())], Redirect::to("/")).into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    fn bad_request(e: impl std::fmt::Display) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::MissingLocation => AppError::BadRequest { message },
            PlanError::LocationNotFound { .. }
            | PlanError::NoRouteInWindow { .. }
            | PlanError::NoRoutes => AppError::NotFound { message },
        }
    }
}

impl From<HistoryError> for AppError {
    fn from(e: HistoryError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            info!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
