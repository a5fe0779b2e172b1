//! Scan configuration for the best-departure search.

use chrono::Duration;

/// Smallest window the dashboard accepts (minutes).
pub const MIN_WINDOW_MINS: u32 = 10;
/// Largest window the dashboard accepts (minutes).
pub const MAX_WINDOW_MINS: u32 = 120;
/// Smallest sampling interval the dashboard accepts (minutes).
pub const MIN_INTERVAL_MINS: u32 = 5;
/// Largest sampling interval the dashboard accepts (minutes).
pub const MAX_INTERVAL_MINS: u32 = 30;

/// Error for a scan configuration that cannot be sampled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanConfigError {
    /// A zero interval would never advance
    #[error("interval must be at least one minute")]
    ZeroInterval,

    /// Value outside the accepted range
    #[error("{field} must be between {min} and {max} minutes, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Parameters for sampling departure instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// How far ahead of the first instant to sample (minutes, inclusive).
    pub window_mins: u32,

    /// Step between sampled instants (minutes).
    pub interval_mins: u32,

    /// Offset from "now" of the first sampled instant (minutes).
    /// Keeps the first request from being in the past by the time it is sent.
    pub lead_mins: u32,
}

impl ScanConfig {
    /// Create a configuration with the default one-minute lead.
    pub fn new(window_mins: u32, interval_mins: u32) -> Result<Self, ScanConfigError> {
        if interval_mins == 0 {
            return Err(ScanConfigError::ZeroInterval);
        }
        Ok(Self {
            window_mins,
            interval_mins,
            lead_mins: 1,
        })
    }

    /// Create a configuration, enforcing the dashboard's input bounds.
    pub fn bounded(window_mins: u32, interval_mins: u32) -> Result<Self, ScanConfigError> {
        check_range("window", window_mins, MIN_WINDOW_MINS, MAX_WINDOW_MINS)?;
        check_range(
            "interval",
            interval_mins,
            MIN_INTERVAL_MINS,
            MAX_INTERVAL_MINS,
        )?;
        Self::new(window_mins, interval_mins)
    }

    /// Set the lead before the first instant.
    pub fn with_lead(mut self, lead_mins: u32) -> Self {
        self.lead_mins = lead_mins;
        self
    }

    /// Number of instants sampled: floor(window / interval) + 1.
    pub fn sample_count(&self) -> usize {
        (self.window_mins / self.interval_mins) as usize + 1
    }

    /// Offset from the scan start of the `k`-th sampled instant.
    pub fn offset(&self, k: usize) -> Duration {
        let step = i64::from(self.interval_mins).saturating_mul(k as i64);
        Duration::minutes(i64::from(self.lead_mins).saturating_add(step))
    }

    pub fn window(&self) -> Duration {
        Duration::minutes(i64::from(self.window_mins))
    }

    pub fn interval(&self) -> Duration {
        Duration::minutes(i64::from(self.interval_mins))
    }

    pub fn lead(&self) -> Duration {
        Duration::minutes(i64::from(self.lead_mins))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_mins: 60,
            interval_mins: 10,
            lead_mins: 1,
        }
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ScanConfigError> {
    if value < min || value > max {
        return Err(ScanConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
