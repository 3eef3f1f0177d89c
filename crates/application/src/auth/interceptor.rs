//! Cross-cutting response inspection.
//!
//! The interceptor is handed to the HTTP adapter at wiring time and
//! consulted after every response. It is active only while token
//! rotation is enabled and a user is signed in; the manager activates it
//! on successful authentication and deactivates it on sign-out, so no
//! handler dangles after the session ends.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::auth::session_store::SessionStore;
use crate::auth::state::AuthState;

/// Header carrying a rotated bearer token.
pub const ROTATED_TOKEN_HEADER: &str = "x-access-token";

/// Inspects inbound responses for rotated tokens and 401s.
pub struct ResponseInterceptor {
    session: SessionStore,
    state: AuthState,
    rotation_enabled: bool,
    active: AtomicBool,
}

impl ResponseInterceptor {
    /// Creates an inactive interceptor.
    ///
    /// `rotation_enabled` comes from client configuration; when false the
    /// interceptor never activates and responses pass through untouched.
    #[must_use]
    pub fn new(session: SessionStore, state: AuthState, rotation_enabled: bool) -> Self {
        Self {
            session,
            state,
            rotation_enabled,
            active: AtomicBool::new(false),
        }
    }

    /// Activates inspection. No-op unless rotation is enabled.
    pub fn activate(&self) {
        if self.rotation_enabled {
            self.active.store(true, Ordering::Release);
        }
    }

    /// Deactivates inspection.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Returns true if responses are currently inspected.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Called by the HTTP adapter on every successful response.
    ///
    /// Persists a rotated token when the server sent one.
    pub async fn on_success(&self, rotated_token: Option<&str>) {
        if !self.is_active() {
            return;
        }
        if let Some(token) = rotated_token {
            tracing::debug!("rotated token received, updating session");
            self.session.save(token).await;
        }
    }

    /// Called by the HTTP adapter when a response came back 401.
    ///
    /// Forces sign-out: the session is cleared and the state machine
    /// moves to `Unauthenticated`. The adapter still returns the original
    /// error so request-level handling fires.
    pub async fn on_unauthorized(&self) {
        if !self.is_active() {
            return;
        }
        tracing::warn!("unauthorized response received, signing out");
        self.session.clear().await;
        self.session.clear_profile().await;
        self.state.set_unauthenticated().await;
        self.deactivate();
    }
}
