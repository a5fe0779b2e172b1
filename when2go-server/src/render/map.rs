//! Leaflet map pages.
//!
//! Two layouts share one template: the traffic overview written by the
//! CLI, where routes are coloured by traffic severity, and the dashboard
//! map, where the selected alternative is highlighted against the others.

use std::fs;
use std::path::Path;

use askama::Template;
use serde::Serialize;

use crate::domain::{Coordinate, DisplayZone, Route, TrafficLevel, TravelMode};
use crate::planner::{JourneyPlan, Selection};

use super::error::RenderError;
use super::script_json;

/// Where the CLI writes its map by default.
pub const DEFAULT_MAP_FILE: &str = "routes_map.html";

/// Notice shown when bike routes were unavailable.
pub const FALLBACK_NOTICE: &str = "⚠️ Bike not available – showing Car routes";

/// Centre of the placeholder map (Hyderabad).
pub const DEFAULT_CENTER: [f64; 2] = [17.3850, 78.4867];

const SELECTED_OVERVIEW_COLOR: &str = "red";
const SELECTED_DASHBOARD_COLOR: &str = "#ff69b4";
const ALTERNATIVE_DASHBOARD_COLOR: &str = "#800080";

/// One polyline on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRoute {
    /// `[lat, lon]` pairs
    pub points: Vec<[f64; 2]>,
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f32,
    /// Leaflet `dashArray`
    pub dash: Option<&'static str>,
    /// Popup HTML
    pub popup: Option<String>,
    pub tooltip: Option<String>,
}

/// Everything a map page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub start: Option<[f64; 2]>,
    pub end: Option<[f64; 2]>,
    pub routes: Vec<MapRoute>,
    pub fallback_notice: Option<&'static str>,
    /// Whether to show the traffic colour legend
    pub legend: bool,
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate<'a> {
    title: &'a str,
    view_json: String,
    legend: bool,
}

/// "Car", "Bike", or "Bike (fallback → Car)".
pub fn mode_label(plan: &JourneyPlan) -> String {
    if plan.fell_back() {
        format!(
            "{} (fallback → {})",
            capitalized(plan.requested_mode),
            capitalized(plan.used_mode)
        )
    } else {
        capitalized(plan.used_mode).to_string()
    }
}

fn capitalized(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Car => "Car",
        TravelMode::Bike => "Bike",
    }
}

/// Traffic overview of the best departure.
///
/// Without `highlight`, every route is drawn coloured by traffic severity.
/// With a valid `highlight` index only that route is drawn, in red. An
/// out-of-range index is treated as no highlight.
pub fn traffic_overview(plan: &JourneyPlan, highlight: Option<usize>, zone: &DisplayZone) -> MapView {
    let option = plan.best();
    let highlight = highlight.filter(|i| *i < option.alternative_count());
    let mode = mode_label(plan);

    let routes = option
        .routes()
        .iter()
        .enumerate()
        .filter(|(i, _)| highlight.is_none_or(|h| h == *i))
        .map(|(i, route)| {
            let (color, weight) = match highlight {
                Some(_) => (SELECTED_OVERVIEW_COLOR, 8),
                None => (
                    TrafficLevel::from_delay_secs(route.summary.traffic_delay_secs).map_color(),
                    6,
                ),
            };
            let arrival = option.arrival_via(i);
            let popup = format!(
                "<b>Route {}</b><br>Mode: {}<br>Distance: {:.2} km<br>Duration: {} mins<br>Traffic Delay: {} mins<br>Arrival Time: {} ({})",
                i + 1,
                mode,
                route.summary.length_km(),
                route.summary.travel_time_mins(),
                route.summary.traffic_delay_mins(),
                zone.clock_24h(arrival),
                zone.abbreviation(arrival),
            );
            MapRoute {
                points: lat_lons(route),
                color,
                weight,
                opacity: 0.8,
                dash: None,
                popup: Some(popup),
                tooltip: None,
            }
        })
        .collect();

    MapView {
        center: plan.origin.to_lat_lon(),
        zoom: 14,
        start: Some(plan.origin.to_lat_lon()),
        end: Some(plan.destination.to_lat_lon()),
        routes,
        fallback_notice: plan.fell_back().then_some(FALLBACK_NOTICE),
        legend: true,
    }
}

/// Dashboard map for a selection: the selected alternative in pink, the
/// other alternatives of the same departure dashed purple underneath.
pub fn dashboard_map(plan: &JourneyPlan, selection: Selection) -> MapView {
    let selection = plan.normalize(selection);
    let (option, selected) = plan.selected(selection);

    let mut routes: Vec<MapRoute> = option
        .routes()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != selection.alternative)
        .map(|(i, route)| MapRoute {
            points: lat_lons(route),
            color: ALTERNATIVE_DASHBOARD_COLOR,
            weight: 5,
            opacity: 0.5,
            dash: Some("5, 5"),
            popup: None,
            tooltip: Some(format!("Alternative Route {}", i + 1)),
        })
        .collect();
    routes.push(MapRoute {
        points: lat_lons(selected),
        color: SELECTED_DASHBOARD_COLOR,
        weight: 8,
        opacity: 0.8,
        dash: None,
        popup: None,
        tooltip: Some("Selected Optimal Route".to_string()),
    });

    MapView {
        center: plan.origin.to_lat_lon(),
        zoom: 10,
        start: Some(plan.origin.to_lat_lon()),
        end: Some(plan.destination.to_lat_lon()),
        routes,
        fallback_notice: plan.fell_back().then_some(FALLBACK_NOTICE),
        legend: false,
    }
}

/// Map shown before anything has been planned.
pub fn placeholder_map() -> MapView {
    MapView {
        center: DEFAULT_CENTER,
        zoom: 11,
        start: None,
        end: None,
        routes: Vec::new(),
        fallback_notice: None,
        legend: false,
    }
}

fn lat_lons(route: &Route) -> Vec<[f64; 2]> {
    route.points.iter().map(Coordinate::to_lat_lon).collect()
}

/// Render a self-contained HTML page for a map.
pub fn render_map(view: &MapView, title: &str) -> Result<String, RenderError> {
    let template = MapTemplate {
        title,
        view_json: script_json(view)?,
        legend: view.legend,
    };
    Ok(template.render()?)
}

/// Render a map and write it to `path`, replacing any previous file.
pub fn write_map(view: &MapView, title: &str, path: &Path) -> Result<(), RenderError> {
    let html = render_map(view, title)?;
    fs::write(path, html).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteSummary, TravelMode};
    use crate::planner::test_support::MockProvider;
    use crate::planner::{JourneyRequest, plan_journey};
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 3, 30, 0).unwrap()
    }

    fn summary(travel: u32, delay: u32, length: u32) -> RouteSummary {
        RouteSummary {
            travel_time_secs: travel,
            traffic_delay_secs: delay,
            length_meters: length,
        }
    }

    fn routes() -> Vec<Route> {
        let line = vec![Coordinate::new(17.36, 78.47), Coordinate::new(17.40, 78.42), Coordinate::new(17.44, 78.38)];
        vec![
            Route::new(line.clone(), summary(1800, 120, 12_340)),
            Route::new(line.clone(), summary(2100, 600, 11_000)),
            Route::new(line, summary(2400, 1200, 15_500)),
        ]
    }

    async fn plan(mode: TravelMode, car_only: bool) -> JourneyPlan {
        let provider = MockProvider::new()
            .with_place("Charminar", Coordinate::new(17.36, 78.47))
            .with_place("HITEC City", Coordinate::new(17.44, 78.38))
            .with_routes(move |req| {
                if car_only && req.mode == TravelMode::Bike {
                    Vec::new()
                } else {
                    routes()
                }
            });
        let request = JourneyRequest::new("Charminar", "HITEC City").with_mode(mode);
        plan_journey(&provider, &request, now()).await.unwrap()
    }

    #[tokio::test]
    async fn overview_colours_routes_by_traffic() {
        let plan = plan(TravelMode::Car, false).await;

        let view = traffic_overview(&plan, None, &DisplayZone::default());

        let colours: Vec<&str> = view.routes.iter().map(|r| r.color).collect();
        assert_eq!(colours, vec!["blue", "orange", "darkred"]);
        assert!(view.routes.iter().all(|r| r.weight == 6));
        assert_eq!(view.fallback_notice, None);
        assert!(view.legend);
        assert_eq!(view.start, Some([17.36, 78.47]));
    }

    #[tokio::test]
    async fn overview_popup_contents() {
        let plan = plan(TravelMode::Car, false).await;

        let view = traffic_overview(&plan, None, &DisplayZone::default());

        // 03:30 UTC = 09:00 IST, plus 30 minutes
        assert_eq!(
            view.routes[0].popup.as_deref(),
            Some("<b>Route 1</b><br>Mode: Car<br>Distance: 12.34 km<br>Duration: 30 mins<br>Traffic Delay: 2 mins<br>Arrival Time: 09:30 (IST)")
        );
    }

    #[tokio::test]
    async fn highlighted_route_drawn_alone_in_red() {
        let plan = plan(TravelMode::Car, false).await;

        let view = traffic_overview(&plan, Some(1), &DisplayZone::default());

        assert_eq!(view.routes.len(), 1);
        assert_eq!(view.routes[0].color, "red");
        assert_eq!(view.routes[0].weight, 8);
        assert!(view.routes[0].popup.as_deref().unwrap().starts_with("<b>Route 2</b>"));
    }

    #[tokio::test]
    async fn out_of_range_highlight_shows_all() {
        let plan = plan(TravelMode::Car, false).await;

        let view = traffic_overview(&plan, Some(7), &DisplayZone::default());

        assert_eq!(view.routes.len(), 3);
    }

    #[tokio::test]
    async fn fallback_is_announced() {
        let plan = plan(TravelMode::Bike, true).await;

        let view = traffic_overview(&plan, None, &DisplayZone::default());

        assert_eq!(view.fallback_notice, Some(FALLBACK_NOTICE));
        assert!(view.routes[0].popup.as_deref().unwrap().contains("Mode: Bike (fallback → Car)"));
        assert_eq!(mode_label(&plan), "Bike (fallback → Car)");
    }

    #[tokio::test]
    async fn dashboard_highlights_selected_alternative() {
        let plan = plan(TravelMode::Car, false).await;
        let selection = plan.select_alternative(plan.default_selection(), 2);

        let view = dashboard_map(&plan, selection);

        assert_eq!(view.routes.len(), 3);
        let selected = view.routes.last().unwrap();
        assert_eq!(selected.color, "#ff69b4");
        assert_eq!(selected.weight, 8);
        let tooltips: Vec<&str> = view.routes[..2].iter().map(|r| r.tooltip.as_deref().unwrap()).collect();
        assert_eq!(tooltips, vec!["Alternative Route 1", "Alternative Route 2"]);
        assert!(view.routes[..2].iter().all(|r| r.dash == Some("5, 5") && r.color == "#800080"));
        assert!(!view.legend);
    }

    #[tokio::test]
    async fn written_map_is_a_leaflet_page() {
        let plan = plan(TravelMode::Car, false).await;
        let view = traffic_overview(&plan, None, &DisplayZone::default());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_MAP_FILE);

        write_map(&view, "Charminar → HITEC City", &path).unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("leaflet"));
        assert!(html.contains("Traffic Legend"));
        assert!(html.contains("Charminar → HITEC City"));
        assert!(html.contains("\"color\":\"orange\""));
    }

    #[test]
    fn placeholder_has_no_routes_or_markers() {
        let view = placeholder_map();
        assert!(view.routes.is_empty());
        assert_eq!(view.start, None);
        let html = render_map(&view, "when2go").unwrap();
        assert!(html.contains("\"start\":null"));
    }
}
