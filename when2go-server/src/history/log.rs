//! The history CSV file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::error::HistoryError;
use super::record::{HEADER, HistoryRecord};

/// Default history file, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "historical_journeys.csv";

/// Handle on a history file.
///
/// The file is created with its header on first use. Rows are only ever
/// appended; existing rows are never rewritten.
#[derive(Debug)]
pub struct HistoryLog {
    path: PathBuf,
    /// Serialises header creation and appends within this process.
    write_lock: Mutex<()>,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file with its header if absent.
    pub fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let needs_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer
                .write_record(HEADER)
                .map_err(|source| self.csv_error(source))?;
        }
        writer
            .serialize(record)
            .map_err(|source| self.csv_error(source))?;
        writer.flush().map_err(|source| self.io_error(source))?;

        debug!(path = %self.path.display(), start = %record.start_location, "history row appended");
        Ok(())
    }

    /// Every readable record in file order. A missing file has no records.
    ///
    /// Rows that fail to parse are skipped.
    pub fn load_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|source| self.csv_error(source))?;

        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<HistoryRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => debug!(row = row + 1, error = %e, "skipping unreadable history row"),
            }
        }
        Ok(records)
    }

    /// Records for a (start, end) pair, compared case-insensitively.
    pub fn load_for_route(&self, start: &str, end: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| r.matches(start, end))
            .collect())
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> HistoryError {
        HistoryError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn arb_record(start: &'static str, end: &'static str) -> impl Strategy<Value = HistoryRecord> {
        (0u32..600, 0u32..120, 1u32..5, 1u32..13, 0u32..60).prop_map(
            move |(travel, delay, alt, hour, minute)| HistoryRecord {
                start_location: start.to_string(),
                end_location: end.to_string(),
                departure_time_ist: format!("{hour:02}:{minute:02} PM"),
                travel_time_min: travel,
                traffic_delay_min: delay,
                route_type: "eco-friendly".to_string(),
                mode: "car".to_string(),
                timestamp: "2026-10-17 17:29:59".to_string(),
                alternative_selected: alt,
            },
        )
    }

    proptest! {
        /// N appended journeys for a pair read back as exactly those N rows
        #[test]
        fn appended_rows_read_back_unchanged(
            wanted in prop::collection::vec(arb_record("Madhapur, Hyderabad", "Kondapur"), 0..15),
            other in prop::collection::vec(arb_record("Kondapur", "Madhapur, Hyderabad"), 0..15),
        ) {
            let dir = TempDir::new().unwrap();
            let log = HistoryLog::new(dir.path().join("history.csv"));

            let mut others = other.iter();
            for record in &wanted {
                log.append(record).unwrap();
                if let Some(o) = others.next() {
                    log.append(o).unwrap();
                }
            }
            for o in others {
                log.append(o).unwrap();
            }

            let found = log.load_for_route("madhapur, hyderabad", "KONDAPUR").unwrap();
            prop_assert_eq!(found, wanted);
        }
    }
}
