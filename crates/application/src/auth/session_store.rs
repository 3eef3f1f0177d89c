//! Session persistence and credential lookup.
//!
//! `SessionStore` keeps the bearer token in durable client storage and
//! mirrors it in memory so the HTTP adapter can read it per request.
//! There is no hidden default-header mutation: the adapter asks this
//! store for the credential on every call.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use tokio::sync::RwLock;

use atrium_domain::{Session, User};

use crate::ports::{ClientStorage, Clock};

/// Storage key for the bearer token.
const ACCESS_TOKEN_KEY: &str = "access_token";
/// Auxiliary storage key for the signed-in role, read by the UI shell.
const ROLE_KEY: &str = "role";
/// Auxiliary storage key for the signed-in display name.
const USERNAME_KEY: &str = "username";

/// Expiry claim of a JWT payload, for best-effort local inspection.
#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// Durable session store and per-request credential provider.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn ClientStorage>,
    session: Arc<RwLock<Session>>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    /// Creates a store backed by the given durable storage.
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            session: Arc::new(RwLock::new(Session::default())),
            clock,
        }
    }

    /// Loads any persisted token into memory and returns it.
    ///
    /// Called once during bootstrap, before any authenticated request.
    pub async fn load(&self) -> Option<String> {
        let token = self.storage.get(ACCESS_TOKEN_KEY).await;
        *self.session.write().await = token
            .clone()
            .map_or_else(Session::default, Session::with_token);
        token
    }

    /// Persists the token and makes it the current credential.
    pub async fn save(&self, token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, token).await;
        *self.session.write().await = Session::with_token(token);
    }

    /// Removes the token from storage and memory.
    pub async fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY).await;
        *self.session.write().await = Session::default();
    }

    /// Returns the current bearer token, or `None`.
    pub async fn read(&self) -> Option<String> {
        self.session.read().await.access_token.clone()
    }

    /// Caches the role and display name for the UI shell.
    pub async fn cache_profile(&self, user: &User) {
        self.storage.set(ROLE_KEY, &user.role).await;
        self.storage.set(USERNAME_KEY, &user.name).await;
    }

    /// Removes the cached role and display name.
    pub async fn clear_profile(&self) {
        self.storage.remove(ROLE_KEY).await;
        self.storage.remove(USERNAME_KEY).await;
    }

    /// Best-effort local expiry inspection of a JWT bearer token.
    ///
    /// Returns true if the `exp` claim is in the past or the token cannot
    /// be decoded. This must never be the sole gate for treating a
    /// session as valid; the bootstrap flow validates server-side.
    #[must_use]
    pub fn is_expired(&self, token: &str) -> bool {
        let mut segments = token.split('.');
        let (Some(_), Some(payload), Some(_), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return true;
        };
        let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload) else {
            return true;
        };
        let Ok(claim) = serde_json::from_slice::<ExpiryClaim>(&bytes) else {
            return true;
        };
        claim.exp <= self.clock.now().timestamp()
    }
}
