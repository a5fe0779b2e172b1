//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{DisplayZone, RoutePriority, TravelMode};
use crate::history::{HistoryRecord, delay_trend, hourly_averages};
use crate::planner::{MAX_INTERVAL_MINS, MAX_WINDOW_MINS, MIN_INTERVAL_MINS, MIN_WINDOW_MINS};
use crate::render::{
    AlternativeCard, DepartureCard, FALLBACK_NOTICE, RenderError, SummaryBar, alternative_cards,
    delay_chart, departure_cards, hourly_chart, render_bar_chart, render_line_chart, summary_bar,
    travel_time_chart,
};

use super::session::{FormState, Session};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The dashboard: form, results of the session and history charts.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub form: FormView,
    pub error: Option<String>,
    pub result: Option<ResultView>,
    pub history: Option<HistoryView>,
}

impl DashboardTemplate {
    /// Build the page for a session. `history` holds the saved records for
    /// the session's route, if anything has been planned.
    pub fn for_session(
        session: &Session,
        history: Option<&[HistoryRecord]>,
        zone: &DisplayZone,
    ) -> Result<Self, RenderError> {
        let result = session
            .current()
            .map(|(plan, selection)| {
                let (option, _) = plan.selected(selection);
                let travel_chart = travel_time_chart(plan, zone)
                    .map(|c| render_line_chart(&c))
                    .transpose()?;
                Ok::<_, RenderError>(ResultView {
                    summary: summary_bar(plan, selection, zone),
                    scanned: plan.scanned,
                    departures: departure_cards(plan, selection, zone),
                    alternatives: alternative_cards(plan, selection),
                    selected_depart_at: zone.clock_12h(option.depart_at()),
                    priority_title: plan.priority.title(),
                    priority_label: plan.priority.as_str(),
                    fallback_notice: plan.fell_back().then_some(FALLBACK_NOTICE),
                    travel_chart,
                    map_key: format!("{}-{}", selection.departure, selection.alternative),
                })
            })
            .transpose()?;

        let history = history.map(HistoryView::from_records).transpose()?;

        Ok(Self {
            form: FormView::from_state(&session.form),
            error: session.error.clone(),
            result,
            history,
        })
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A `<select>` choice.
#[derive(Debug, Clone)]
pub struct ChoiceView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// The form, pre-filled from the session.
#[derive(Debug, Clone)]
pub struct FormView {
    pub start: String,
    pub end: String,
    pub modes: Vec<ChoiceView>,
    pub priorities: Vec<ChoiceView>,
    pub best_departure: bool,
    pub window: String,
    pub interval: String,
    pub min_window: u32,
    pub max_window: u32,
    pub min_interval: u32,
    pub max_interval: u32,
}

impl FormView {
    pub fn from_state(form: &FormState) -> Self {
        let modes = [TravelMode::Car, TravelMode::Bike]
            .into_iter()
            .map(|m| ChoiceView {
                value: m.as_str(),
                label: match m {
                    TravelMode::Car => "Car",
                    TravelMode::Bike => "Bike",
                },
                selected: m == form.mode,
            })
            .collect();
        let priorities = RoutePriority::ALL
            .into_iter()
            .map(|p| ChoiceView {
                value: p.as_str(),
                label: p.title(),
                selected: p == form.priority,
            })
            .collect();

        Self {
            start: form.start.clone(),
            end: form.end.clone(),
            modes,
            priorities,
            best_departure: form.best_departure,
            window: form.window.clone(),
            interval: form.interval.clone(),
            min_window: MIN_WINDOW_MINS,
            max_window: MAX_WINDOW_MINS,
            min_interval: MIN_INTERVAL_MINS,
            max_interval: MAX_INTERVAL_MINS,
        }
    }
}

/// Everything shown for the session's plan.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub summary: SummaryBar,
    pub scanned: bool,
    pub departures: Vec<DepartureCard>,
    pub alternatives: Vec<AlternativeCard>,
    pub selected_depart_at: String,
    pub priority_title: &'static str,
    pub priority_label: &'static str,
    pub fallback_notice: Option<&'static str>,
    /// Rendered SVG
    pub travel_chart: Option<String>,
    /// Changes with the selection so the map iframe reloads
    pub map_key: String,
}

impl ResultView {
    pub fn option_count(&self) -> usize {
        self.departures.len()
    }
}

/// Historical charts for the session's route.
#[derive(Debug, Clone)]
pub struct HistoryView {
    /// Rendered SVG
    pub hourly_chart: Option<String>,
    /// Rendered SVG
    pub delay_chart: Option<String>,
}

impl HistoryView {
    pub fn from_records(records: &[HistoryRecord]) -> Result<Self, RenderError> {
        let hourly_chart = hourly_chart(&hourly_averages(records))
            .map(|c| render_bar_chart(&c))
            .transpose()?;
        let delay_chart = delay_chart(&delay_trend(records))
            .map(|c| render_line_chart(&c))
            .transpose()?;
        Ok(Self {
            hourly_chart,
            delay_chart,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.hourly_chart.is_none() && self.delay_chart.is_none()
    }
}
