//! Human-readable clock times in the configured display time zone.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use super::error::DomainError;

/// 12-hour clock format used on cards and in history, e.g. "05:40 PM".
pub const CLOCK_12H: &str = "%I:%M %p";

/// 24-hour clock format used on the CLI and map popups, e.g. "17:40".
pub const CLOCK_24H: &str = "%H:%M";

/// Save-time format in history, e.g. "2026-10-17 17:40:02".
pub const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// The time zone all displayed clock times are converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayZone(Tz);

impl DisplayZone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parse an IANA zone name such as "Asia/Kolkata".
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::UnknownTimeZone(name.to_string()))
    }

    pub fn tz(&self) -> Tz {
        self.0
    }

    /// Short abbreviation for labels, e.g. "IST".
    pub fn abbreviation(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.0).format("%Z").to_string()
    }

    /// "05:40 PM".
    pub fn clock_12h(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.0).format(CLOCK_12H).to_string()
    }

    /// "17:40".
    pub fn clock_24h(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.0).format(CLOCK_24H).to_string()
    }

    /// "2026-10-17 17:40:02".
    pub fn timestamp(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.0).format(TIMESTAMP).to_string()
    }

    /// Hour of day (0-23) in this zone.
    pub fn hour(&self, at: DateTime<Utc>) -> u32 {
        at.with_timezone(&self.0).hour()
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        Self(chrono_tz::Asia::Kolkata)
    }
}

/// Parse a "05:40 PM" clock string back into a time of day.
pub fn parse_clock_12h(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), CLOCK_12H).ok()
}
