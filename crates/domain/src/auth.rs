//! Authentication state types.
//!
//! This module defines the session record, the authentication status
//! machine, and the error shapes surfaced by sign-in and sign-up.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current authentication status of the application.
///
/// The status starts at `Configuring` while the persisted session is
/// validated against the backend, then settles into one of the two
/// terminal-ish states. After bootstrap the machine only moves between
/// `Authenticated` and `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// Initial value before the automatic session-validation attempt completes.
    #[default]
    Configuring,
    /// A user is present and the backend accepted the session.
    Authenticated,
    /// No valid session; the UI must route to sign-in.
    Unauthenticated,
}

impl AuthStatus {
    /// Returns true if a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// Returns true if the initial validation attempt is still running.
    #[must_use]
    pub const fn is_configuring(&self) -> bool {
        matches!(self, Self::Configuring)
    }
}

/// The durable client-side session.
///
/// The bearer token is the sole piece of durable auth state. A non-null
/// token only means a validation attempt has been made; authority over
/// its validity rests with the server on each call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Bearer token for the authenticated user, if any.
    pub access_token: Option<String>,
}

impl Session {
    /// Creates a session holding the given token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
        }
    }

    /// Returns true if a token is present.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.access_token.is_some()
    }
}

/// A per-field validation error returned by sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The form field the message applies to.
    pub field: String,
    /// Human-readable message for that field.
    pub message: String,
}

/// Error shape sign-in and sign-up resolve with.
///
/// These operations do not throw past the auth boundary; callers branch
/// on the result. Structured per-field errors are surfaced against their
/// form fields, anything else as a single generic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// Structured per-field validation errors.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    /// A single generic message.
    #[error("{0}")]
    Message(String),
}

impl AuthFailure {
    /// Returns the message attached to the named field, if any.
    #[must_use]
    pub fn field_message(&self, field: &str) -> Option<&str> {
        match self {
            Self::Validation(errors) => errors
                .iter()
                .find(|e| e.field == field)
                .map(|e| e.message.as_str()),
            Self::Message(_) => None,
        }
    }
}
