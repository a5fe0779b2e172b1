//! Render error types.

use std::path::PathBuf;

/// Error producing or saving rendered output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("could not encode map data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
