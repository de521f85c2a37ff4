//! Error types for the search layer
//!
//! Covers the full taxonomy: transport failures mapped to fixed user-facing
//! messages, backend-reported errors, malformed response shapes, short-query
//! rejection, and supersession (which is explicitly not an error condition
//! for the caller's state).

use thiserror::Error;

/// Error types for search and suggestion operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// Backend returned HTTP 404
    #[error("No results found")]
    NotFound,

    /// Backend returned HTTP 429
    #[error("Too many requests. Please try again later.")]
    RateLimited,

    /// Backend returned HTTP 5xx
    #[error("Server error. Please try again later.")]
    Server,

    /// Backend responded with an explicit `{ "error": ... }` payload
    #[error("{0}")]
    Api(String),

    /// Response body did not match the expected envelope shape
    #[error("Invalid response format")]
    InvalidResponse,

    /// Suggestion query shorter than the minimum length
    #[error("Please enter at least 2 characters")]
    QueryTooShort,

    /// Request was superseded by a newer one
    #[error("request superseded")]
    Superseded,

    /// Transport-level failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SearchError {
    /// Map an unexpected HTTP status to the fixed message table
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            404 => SearchError::NotFound,
            429 => SearchError::RateLimited,
            500..=599 => SearchError::Server,
            code => SearchError::Other(format!("Request failed with status {code}")),
        }
    }

    /// User-facing message for this error
    ///
    /// Fixed strings for the mapped transport cases; the raw message
    /// otherwise, with a generic fallback for transport failures that
    /// carry no useful detail.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Transport(e) if e.is_connect() || e.is_timeout() => {
                "Something went wrong. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Whether this outcome came from supersession rather than failure
    ///
    /// Superseded requests must never populate caller-visible error state.
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchError::Superseded)
    }
}
