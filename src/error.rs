//! Conversation error types
//!
//! Everything that can go wrong while submitting a profile or sending a
//! chat query.

use thiserror::Error;

/// Errors surfaced by the conversation controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    /// The backend could not be reached or answered with a failure
    #[error("Network failure: {0}")]
    Network(#[from] NetworkFailure),

    /// A required profile field is empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A profile field holds a value the backend cannot accept
    #[error("Invalid value for field: {0}")]
    InvalidField(&'static str),

    /// Another request is still in flight
    #[error("A request is already in flight")]
    InFlight,
}

/// Why a backend call failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkFailure {
    #[error("request timed out")]
    Timeout,

    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// Non-2xx answer; `body` is kept for the log line
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl ChatError {
    /// Whether this error came from the backend rather than the form
    pub fn is_network(&self) -> bool {
        matches!(self, ChatError::Network(_))
    }
}

/// Result type alias for conversation operations
pub type ChatResult<T> = Result<T, ChatError>;
