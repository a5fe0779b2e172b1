//! History error types.

use std::path::PathBuf;

/// Error reading or appending to the history file.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// File could not be opened, created or written
    #[error("history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding failed, or the header could not be read
    #[error("history file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
