//! Error types for StudyLog.

use thiserror::Error;

/// Common error type for StudyLog.
#[derive(Error, Debug)]
pub enum StudylogError {
    /// Transport-level HTTP failure (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error for local data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The action needs a session record and none is present.
    #[error("login required")]
    LoginRequired,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StudylogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StudylogError::Decode(e.to_string())
        } else {
            StudylogError::Http(e.to_string())
        }
    }
}

/// Result type alias for StudyLog operations.
pub type Result<T> = std::result::Result<T, StudylogError>;
