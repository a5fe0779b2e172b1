//! Aggregations over history records for the dashboard charts.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::record::HistoryRecord;

/// Mean travel time of the records departing in one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyAverage {
    /// Hour of day, 0-23
    pub hour: u32,
    pub average_travel_min: f64,
    pub samples: usize,
}

/// Traffic delay observed by one record, placed at its save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelayPoint {
    pub saved_at: NaiveDateTime,
    pub traffic_delay_min: u32,
}

/// Mean travel time per departure hour, ordered by hour.
///
/// Records whose departure time does not parse are left out.
pub fn hourly_averages(records: &[HistoryRecord]) -> Vec<HourlyAverage> {
    let mut by_hour: BTreeMap<u32, (u64, usize)> = BTreeMap::new();
    for record in records {
        if let Some(hour) = record.departure_hour() {
            let entry = by_hour.entry(hour).or_default();
            entry.0 += u64::from(record.travel_time_min);
            entry.1 += 1;
        }
    }

    by_hour
        .into_iter()
        .map(|(hour, (total, samples))| HourlyAverage {
            hour,
            average_travel_min: total as f64 / samples as f64,
            samples,
        })
        .collect()
}

/// Traffic delay per record, ordered by save time.
///
/// Records whose timestamp does not parse are left out; records saved at
/// the same instant keep file order.
pub fn delay_trend(records: &[HistoryRecord]) -> Vec<DelayPoint> {
    let mut points: Vec<DelayPoint> = records
        .iter()
        .filter_map(|r| {
            r.saved_at().map(|saved_at| DelayPoint {
                saved_at,
                traffic_delay_min: r.traffic_delay_min,
            })
        })
        .collect();
    points.sort_by_key(|p| p.saved_at);
    points
}
