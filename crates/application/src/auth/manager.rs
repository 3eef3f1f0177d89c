//! The authentication state machine.
//!
//! `AuthManager` orchestrates sign-in, sign-up, silent re-authentication
//! on load, sign-out, token refresh, and profile updates. Every failure
//! path resolves by clearing the session and moving to
//! `Unauthenticated`; the application is never left half-authenticated.

use std::sync::Arc;

use atrium_domain::{AuthFailure, SignInRequest, SignUpRequest, User, UserUpdate};

use crate::auth::interceptor::ResponseInterceptor;
use crate::auth::session_store::SessionStore;
use crate::auth::state::AuthState;
use crate::error::ApiError;
use crate::ports::AuthApi;

/// Client-side authentication orchestrator.
pub struct AuthManager {
    state: AuthState,
    session: SessionStore,
    api: Arc<dyn AuthApi>,
    interceptor: Arc<ResponseInterceptor>,
}

impl AuthManager {
    /// Wires the manager to its collaborators.
    ///
    /// The same `interceptor` instance must be the one handed to the HTTP
    /// adapter, so that activation here takes effect there.
    #[must_use]
    pub fn new(
        state: AuthState,
        session: SessionStore,
        api: Arc<dyn AuthApi>,
        interceptor: Arc<ResponseInterceptor>,
    ) -> Self {
        Self {
            state,
            session,
            api,
            interceptor,
        }
    }

    /// Shared state handle for the UI layer.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.clone()
    }

    /// The session store backing this manager.
    #[must_use]
    pub fn session(&self) -> SessionStore {
        self.session.clone()
    }

    /// Silent re-authentication, run once on load.
    ///
    /// Reads any persisted token and validates it server-side. The
    /// loading flag stays set until validation fully resolves; dependent
    /// UI must gate on it.
    pub async fn bootstrap(&self) {
        self.state.set_loading(true).await;

        match self.session.load().await {
            None => {
                // No session; make sure no stale credential lingers.
                self.session.clear().await;
                self.state.set_unauthenticated().await;
            }
            Some(token) => match self.api.validate(&token).await {
                Ok(validated) => {
                    let current = validated.rotated_token.unwrap_or(token);
                    self.session.save(&current).await;
                    self.state.set_authenticated(validated.user).await;
                    self.interceptor.activate();
                }
                Err(error) => {
                    tracing::debug!(%error, "session validation failed during bootstrap");
                    self.clear_session().await;
                }
            },
        }

        self.state.set_loading(false).await;
    }

    /// Posts credentials to the sign-in endpoint.
    ///
    /// Resolves with the user or the failure; it does not propagate
    /// errors past this boundary. A structured validation body surfaces
    /// per field, anything else as a single message.
    pub async fn sign_in(&self, request: SignInRequest) -> Result<User, AuthFailure> {
        match self.api.sign_in(&request).await {
            Ok(response) => {
                self.establish(response.access_token, response.user).await
            }
            Err(error) => {
                self.clear_session().await;
                Err(Self::failure_from(error))
            }
        }
    }

    /// Posts registration fields to the sign-up endpoint.
    ///
    /// Same contract as [`AuthManager::sign_in`].
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<User, AuthFailure> {
        match self.api.sign_up(&request).await {
            Ok(response) => {
                self.establish(response.access_token, response.user).await
            }
            Err(error) => {
                self.clear_session().await;
                Err(Self::failure_from(error))
            }
        }
    }

    /// Clears the session and all locally cached profile fields.
    ///
    /// Idempotent: safe to call when already signed out.
    pub async fn sign_out(&self) {
        self.interceptor.deactivate();
        self.session.clear().await;
        self.session.clear_profile().await;
        self.state.set_unauthenticated().await;
    }

    /// Posts to the refresh endpoint.
    ///
    /// Returns the rotated token if the response carried one, `None`
    /// otherwise. On failure the session is cleared, same as a failed
    /// validation.
    pub async fn refresh_token(&self) -> Result<Option<String>, AuthFailure> {
        self.state.set_loading(true).await;

        let result = match self.api.refresh().await {
            Ok(Some(token)) => {
                self.session.save(&token).await;
                Ok(Some(token))
            }
            Ok(None) => Ok(None),
            Err(error) => {
                tracing::debug!(%error, "token refresh failed");
                self.clear_session().await;
                Err(Self::failure_from(error))
            }
        };

        self.state.set_loading(false).await;
        result
    }

    /// Sends partial user fields to the update endpoint.
    ///
    /// On success the stored user is replaced wholesale with the
    /// response body.
    pub async fn update_user(&self, update: UserUpdate) -> Result<(), AuthFailure> {
        match self.api.update_user(&update).await {
            Ok(user) => {
                self.state.replace_user(user).await;
                Ok(())
            }
            Err(error) => {
                tracing::debug!(%error, "user update failed");
                self.clear_session().await;
                Err(Self::failure_from(error))
            }
        }
    }

    async fn establish(&self, token: String, user: User) -> Result<User, AuthFailure> {
        self.session.save(&token).await;
        self.session.cache_profile(&user).await;
        self.state.set_authenticated(user.clone()).await;
        self.interceptor.activate();
        Ok(user)
    }

    async fn clear_session(&self) {
        self.interceptor.deactivate();
        self.session.clear().await;
        self.state.set_unauthenticated().await;
    }

    fn failure_from(error: ApiError) -> AuthFailure {
        match error {
            ApiError::Validation(fields) => AuthFailure::Validation(fields),
            ApiError::Unauthorized => {
                AuthFailure::Message("session is no longer valid".to_string())
            }
            ApiError::Status { .. } | ApiError::Network(_) => {
                AuthFailure::Message(error.to_string())
            }
        }
    }
}
