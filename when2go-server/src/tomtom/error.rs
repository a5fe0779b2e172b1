//! TomTom client error types.

use std::fmt;

/// Errors from the TomTom HTTP client.
#[derive(Debug)]
pub enum TomTomError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,

    /// Base URL could not be used to build a request URL
    InvalidUrl(String),
}

impl fmt::Display for TomTomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomTomError::Http(e) => write!(f, "HTTP error: {e}"),
            TomTomError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TomTomError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            TomTomError::RateLimited => write!(f, "rate limited by TomTom API"),
            TomTomError::Unauthorized => write!(f, "unauthorized (check TOMTOM_API_KEY)"),
            TomTomError::InvalidUrl(msg) => write!(f, "invalid URL: {msg}"),
        }
    }
}

impl std::error::Error for TomTomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TomTomError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TomTomError {
    fn from(err: reqwest::Error) -> Self {
        TomTomError::Http(err)
    }
}
