//! Error types for the Warden SDK

use thiserror::Error;

/// Result type alias for Warden SDK operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Warden SDK
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication failed (401)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Authorization failed (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (409), e.g. createOnly save of an existing role
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation error (422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server error (5xx)
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx response
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an error from an HTTP status code and response body
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 => Error::Authentication(message),
            403 => Error::Forbidden(message),
            404 => Error::NotFound(message),
            409 => Error::Conflict(message),
            422 => Error::Validation(message),
            s @ 500..=599 => Error::Server { status: s, message },
            s => Error::Api { status: s, message },
        }
    }

    /// The HTTP status code that produced this error, if there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication(_) => Some(401),
            Error::Forbidden(_) => Some(403),
            Error::NotFound(_) => Some(404),
            Error::Conflict(_) => Some(409),
            Error::Validation(_) => Some(422),
            Error::Server { status, .. } | Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the server reported the resource missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True when the server rejected a createOnly save because the role exists
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }
}
