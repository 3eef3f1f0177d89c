//! Carrier-side credential types.
//!
//! The proxy authenticates against the shipping carrier's identity
//! endpoint with an OAuth2 client-credentials grant and caches the
//! resulting bearer token until it expires.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A cached carrier bearer token with its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierToken {
    /// The access token string.
    pub access_token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl CarrierToken {
    /// Creates a token obtained at `obtained_at` with the given lifetime.
    #[must_use]
    pub fn new(access_token: String, obtained_at: DateTime<Utc>, expires_in_secs: u64) -> Self {
        Self {
            access_token,
            expires_at: obtained_at + chrono::Duration::seconds(expires_in_secs.cast_signed()),
        }
    }

    /// Returns true if the expiry is strictly in the future.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Response body of a successful client-credentials grant exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantResponse {
    /// The issued bearer token.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}
