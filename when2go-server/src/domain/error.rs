//! Domain error types.
//!
//! These errors represent validation failures when parsing user or
//! configuration input into domain values. They are distinct from API/IO
//! errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Travel mode not recognised
    #[error("unknown travel mode: {0}")]
    UnknownMode(String),

    /// Route priority not recognised
    #[error("unknown route priority: {0}")]
    UnknownPriority(String),

    /// Time zone name not recognised
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
}
