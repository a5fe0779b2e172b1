//! Append-only log of completed journey lookups.
//!
//! Each completed lookup (and each change of the displayed route) appends
//! one CSV row. The read path filters rows for a (start, end) pair and
//! aggregates them for the dashboard's historical charts.

mod error;
mod log;
mod record;
mod stats;

pub use error::HistoryError;
pub use log::{DEFAULT_HISTORY_FILE, HistoryLog};
pub use record::{HEADER, HistoryRecord};
pub use stats::{DelayPoint, HourlyAverage, delay_trend, hourly_averages};
