//! Error types for the lead audit engine

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by collaborators around the classification core.
///
/// The classifier itself never fails; an invalid phone format is a
/// classification outcome, not an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Rule lookup failed: {0}")]
    Lookup(String),

    #[error("Rule lookup timed out after {0:?}")]
    LookupTimeout(Duration),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Narrative generation failed: {0}")]
    Narrative(String),

    #[error("Record source error: {0}")]
    RecordSource(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error belongs to the dynamic lookup path and must be
    /// recovered by falling back to the static rule.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Error::Lookup(_)
                | Error::LookupTimeout(_)
                | Error::MissingCredentials(_)
                | Error::Http(_)
                | Error::InvalidPattern(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
