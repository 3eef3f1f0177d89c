//! Wire payloads for the backend auth endpoints.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Credentials posted to the sign-in endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    /// Email or username.
    pub identifier: String,
    /// Plaintext password; only ever sent over the wire, never stored.
    pub password: String,
}

/// Registration fields posted to the sign-up endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    /// Display name.
    pub name: String,
    /// Sign-in email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role, if the deployment allows choosing one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Successful response from sign-in or sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Bearer token for the new session.
    pub access_token: String,
    /// The authenticated principal.
    pub user: User,
}

/// Result of validating a persisted token against the backend.
///
/// The rotated token, when present, arrived in a response header rather
/// than the body; the HTTP adapter lifts it into this struct.
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    /// The current user payload.
    pub user: User,
    /// Replacement bearer token, if the server rotated it.
    pub rotated_token: Option<String>,
}

/// Partial user fields sent to the update endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New account status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_update_skips_absent_fields() {
        let update = UserUpdate {
            name: Some("Ada".to_string()),
            ..UserUpdate::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"name":"Ada"}"#);
    }

    #[test]
    fn test_sign_in_request_shape() {
        let req = SignInRequest {
            identifier: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""identifier":"ada@example.com""#));
    }
}
