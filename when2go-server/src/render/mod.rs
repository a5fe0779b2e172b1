//! Presentation: Leaflet maps, comparison cards and SVG charts.
//!
//! Everything here is a pure function from a `JourneyPlan` (or history
//! records) to view models, plus askama templates that turn those view
//! models into HTML.

mod cards;
mod chart;
mod error;
mod map;

pub use cards::{AlternativeCard, DepartureCard, SummaryBar, alternative_cards, departure_cards, summary_bar};
pub use chart::{
    BarChart, ChartBar, ChartPoint, LineChart, Marker, Tick, delay_chart, hourly_chart, render_bar_chart,
    render_line_chart, travel_time_chart,
};
pub use error::RenderError;
pub use map::{
    DEFAULT_CENTER, DEFAULT_MAP_FILE, FALLBACK_NOTICE, MapRoute, MapView, dashboard_map,
    mode_label, placeholder_map, render_map, traffic_overview, write_map,
};

/// JSON for embedding in an inline `<script>`.
///
/// `</` is escaped so that no string value can close the script element.
pub(crate) fn script_json<T: serde::Serialize>(value: &T) -> Result<String, RenderError> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace("</", "<\\/"))
}
