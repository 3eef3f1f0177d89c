//! Application error types

use atrium_domain::FieldError;
use thiserror::Error;

/// Errors surfaced by the backend HTTP adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server rejected the bearer token (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// The server returned structured per-field validation errors.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The server returned an unexpected status.
    #[error("unexpected status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason text.
        message: String,
    },

    /// The request never reached the server.
    #[error("network error: {0}")]
    Network(String),
}

/// Result type alias for backend API calls.
pub type ApiResult<T> = Result<T, ApiError>;
