//! One row of the history file.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DisplayZone, TIMESTAMP, parse_clock_12h};
use crate::planner::{JourneyPlan, Selection};

/// Column names, in file order.
pub const HEADER: [&str; 9] = [
    "start_location",
    "end_location",
    "departure_time_ist",
    "travel_time_min",
    "traffic_delay_min",
    "route_type",
    "mode",
    "timestamp",
    "alternative_selected",
];

/// A saved journey lookup.
///
/// Clock values are text in the display time zone: `departure_time_ist`
/// as `%I:%M %p`, `timestamp` as `%Y-%m-%d %H:%M:%S`. The column name
/// keeps its historical `_ist` suffix whatever the zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub start_location: String,
    pub end_location: String,
    pub departure_time_ist: String,
    pub travel_time_min: u32,
    pub traffic_delay_min: u32,
    /// Route priority label (`fastest`, `shortest`, `eco-friendly`)
    pub route_type: String,
    pub mode: String,
    pub timestamp: String,
    /// 1-based index of the displayed alternative
    pub alternative_selected: u32,
}

impl HistoryRecord {
    /// Record for the route a selection points at, saved at `now`.
    pub fn from_selection(
        plan: &JourneyPlan,
        selection: Selection,
        zone: &DisplayZone,
        now: DateTime<Utc>,
    ) -> Self {
        let selection = plan.normalize(selection);
        let (option, route) = plan.selected(selection);
        Self {
            start_location: plan.start.clone(),
            end_location: plan.end.clone(),
            departure_time_ist: zone.clock_12h(option.depart_at()),
            travel_time_min: route.summary.travel_time_mins(),
            traffic_delay_min: route.summary.traffic_delay_mins(),
            route_type: plan.priority.as_str().to_string(),
            mode: plan.used_mode.as_str().to_string(),
            timestamp: zone.timestamp(now),
            alternative_selected: selection.alternative as u32 + 1,
        }
    }

    /// Whether this record is for the given route, ignoring case.
    pub fn matches(&self, start: &str, end: &str) -> bool {
        self.start_location.to_lowercase() == start.to_lowercase()
            && self.end_location.to_lowercase() == end.to_lowercase()
    }

    /// Departure clock time, if it parses.
    pub fn departure_time(&self) -> Option<NaiveTime> {
        parse_clock_12h(&self.departure_time_ist)
    }

    /// Hour of day (0-23) of the departure, if it parses.
    pub fn departure_hour(&self) -> Option<u32> {
        self.departure_time().map(|t| t.hour())
    }

    /// Save time, if it parses.
    pub fn saved_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> HistoryRecord {
        HistoryRecord {
            start_location: "Charminar".to_string(),
            end_location: "HITEC City".to_string(),
            departure_time_ist: "06:45 PM".to_string(),
            travel_time_min: 42,
            traffic_delay_min: 7,
            route_type: "fastest".to_string(),
            mode: "car".to_string(),
            timestamp: "2026-10-17 18:44:10".to_string(),
            alternative_selected: 1,
        }
    }

    #[test]
    fn matching_ignores_case_but_not_content() {
        let r = record();
        assert!(r.matches("charminar", "hitec city"));
        assert!(r.matches("CHARMINAR", "HITEC CITY"));
        assert!(!r.matches("Charminar ", "HITEC City"));
        assert!(!r.matches("HITEC City", "Charminar"));
    }

    #[test]
    fn parses_clock_fields() {
        let r = record();
        assert_eq!(r.departure_hour(), Some(18));
        assert_eq!(
            r.saved_at(),
            NaiveDateTime::parse_from_str("2026-10-17 18:44:10", "%Y-%m-%d %H:%M:%S").ok()
        );
    }

    #[test]
    fn unparsable_clock_is_none() {
        let r = HistoryRecord {
            departure_time_ist: "teatime".to_string(),
            timestamp: "yesterday".to_string(),
            ..record()
        };
        assert_eq!(r.departure_hour(), None);
        assert_eq!(r.saved_at(), None);
    }

    #[tokio::test]
    async fn record_from_selection_uses_selected_alternative() {
        use crate::domain::{Coordinate, TravelMode};
        use crate::planner::test_support::MockProvider;
        use crate::planner::{JourneyRequest, plan_journey};
        use chrono::TimeZone;

        let provider = MockProvider::new()
            .with_place("Charminar", Coordinate::new(17.36, 78.47))
            .with_place("HITEC City", Coordinate::new(17.44, 78.38))
            .car_only(2520);
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let request = JourneyRequest::new("Charminar", "HITEC City").with_mode(TravelMode::Bike);
        let plan = plan_journey(&provider, &request, now).await.unwrap();
        let zone = DisplayZone::default();

        let saved = HistoryRecord::from_selection(&plan, plan.default_selection(), &zone, now);

        assert_eq!(saved.start_location, "Charminar");
        assert_eq!(saved.end_location, "HITEC City");
        // 12:00 UTC is 17:30 IST
        assert_eq!(saved.departure_time_ist, "05:30 PM");
        assert_eq!(saved.timestamp, "2026-10-17 17:30:00");
        assert_eq!(saved.travel_time_min, 42);
        assert_eq!(saved.route_type, "fastest");
        assert_eq!(saved.mode, "car");
        assert_eq!(saved.alternative_selected, 1);
    }
}
