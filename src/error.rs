//! Error types for binder_organizer

use thiserror::Error;

/// Unified error type for binder_organizer operations
#[derive(Error, Debug)]
pub enum OrganizerError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error status code
    #[error("unexpected HTTP status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Failed to parse JSON data
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing the local store failed
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// PDF assembly failed
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// No set with the given id exists
    #[error("set not found: {0}")]
    SetNotFound(String),

    /// No card with the given id exists
    #[error("card not found: {0}")]
    CardNotFound(String),

    /// The suggestion service returned an unusable response
    #[error("suggestion service error: {0}")]
    Suggestion(String),
}

/// Result alias for binder_organizer operations
pub type Result<T> = std::result::Result<T, OrganizerError>;
