//! Comparison cards for the dashboard.

use serde::Serialize;

use crate::domain::{DisplayZone, TrafficLevel};
use crate::planner::{JourneyPlan, Selection};

use super::map::mode_label;

/// One departure option, as a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureCard {
    /// Index into the plan's options (time order)
    pub index: usize,
    /// "⭐ BEST OVERALL!" or "Option N" (N = rank by duration)
    pub title: String,
    pub is_best: bool,
    pub is_selected: bool,
    pub depart_at: String,
    pub duration_mins: u32,
    pub traffic: &'static str,
    pub arrival: String,
}

/// One alternative of the selected departure, as a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeCard {
    pub index: usize,
    /// "Selected Alternative" or "Alternative N"
    pub title: String,
    pub is_selected: bool,
    pub duration_mins: u32,
    pub delay_mins: u32,
    /// One decimal place
    pub distance_km: String,
    pub traffic: &'static str,
}

/// The line of figures above the map for the selected route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBar {
    pub depart_at: String,
    pub duration_mins: u32,
    pub arrival: String,
    pub delay_mins: u32,
    pub distance_km: String,
    pub mode: String,
    pub priority: &'static str,
    pub fallback: bool,
}

/// Departure cards sorted by primary duration, quickest first.
///
/// Equal durations keep time order, so the best option (earliest of the
/// quickest) always comes first.
pub fn departure_cards(plan: &JourneyPlan, selection: Selection, zone: &DisplayZone) -> Vec<DepartureCard> {
    let selection = plan.normalize(selection);
    let mut order: Vec<usize> = (0..plan.options().len()).collect();
    order.sort_by_key(|i| plan.options()[*i].primary_travel_time_secs());

    order
        .into_iter()
        .enumerate()
        .map(|(rank, index)| {
            let option = &plan.options()[index];
            let is_best = index == plan.best_index();
            DepartureCard {
                index,
                title: if is_best {
                    "⭐ BEST OVERALL!".to_string()
                } else {
                    format!("Option {}", rank + 1)
                },
                is_best,
                is_selected: index == selection.departure,
                depart_at: zone.clock_12h(option.depart_at()),
                duration_mins: option.primary().summary.travel_time_mins(),
                traffic: TrafficLevel::from_delay_secs(option.primary_traffic_delay_secs()).label(),
                arrival: zone.clock_12h(option.arrival_at()),
            }
        })
        .collect()
}

/// Cards for every alternative of the selected departure, in provider order.
pub fn alternative_cards(plan: &JourneyPlan, selection: Selection) -> Vec<AlternativeCard> {
    let selection = plan.normalize(selection);
    let (option, _) = plan.selected(selection);

    option
        .routes()
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let is_selected = index == selection.alternative;
            AlternativeCard {
                index,
                title: if is_selected {
                    "Selected Alternative".to_string()
                } else {
                    format!("Alternative {}", index + 1)
                },
                is_selected,
                duration_mins: route.summary.travel_time_mins(),
                delay_mins: route.summary.traffic_delay_mins(),
                distance_km: format!("{:.1}", route.summary.length_km()),
                traffic: TrafficLevel::from_delay_secs(route.summary.traffic_delay_secs).label(),
            }
        })
        .collect()
}

pub fn summary_bar(plan: &JourneyPlan, selection: Selection, zone: &DisplayZone) -> SummaryBar {
    let selection = plan.normalize(selection);
    let (option, route) = plan.selected(selection);
    SummaryBar {
        depart_at: zone.clock_12h(option.depart_at()),
        duration_mins: route.summary.travel_time_mins(),
        arrival: zone.clock_12h(option.arrival_via(selection.alternative)),
        delay_mins: route.summary.traffic_delay_mins(),
        distance_km: format!("{:.1}", route.summary.length_km()),
        mode: mode_label(plan),
        priority: plan.priority.title(),
        fallback: plan.fell_back(),
    }
}
