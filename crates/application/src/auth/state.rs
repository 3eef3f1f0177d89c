//! Shared authentication state.
//!
//! Both the auth manager and the response interceptor hold clones of
//! `AuthState`, which is how a 401 observed on any authenticated call
//! flips the whole application to `Unauthenticated` without a reference
//! cycle between the two.

use std::sync::Arc;

use tokio::sync::RwLock;

use atrium_domain::{AuthStatus, User};

/// A point-in-time copy of the authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Current status of the state machine.
    pub status: AuthStatus,
    /// The signed-in user, if any.
    pub user: Option<User>,
    /// True while bootstrap or refresh is in flight; the UI must not
    /// render protected content while this is set.
    pub loading: bool,
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self {
            status: AuthStatus::Configuring,
            user: None,
            loading: false,
        }
    }
}

/// Thread-safe shared authentication state.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    inner: Arc<RwLock<AuthSnapshot>>,
}

impl AuthState {
    /// Creates state in the initial `Configuring` status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> AuthSnapshot {
        self.inner.read().await.clone()
    }

    /// Current status.
    pub async fn status(&self) -> AuthStatus {
        self.inner.read().await.status
    }

    /// The signed-in user, if any.
    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.user.clone()
    }

    /// True iff a user is currently stored.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.user.is_some()
    }

    /// True while bootstrap or refresh is in flight.
    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    pub(crate) async fn set_loading(&self, loading: bool) {
        self.inner.write().await.loading = loading;
    }

    pub(crate) async fn set_authenticated(&self, user: User) {
        let mut inner = self.inner.write().await;
        inner.status = AuthStatus::Authenticated;
        inner.user = Some(user);
    }

    pub(crate) async fn set_unauthenticated(&self) {
        let mut inner = self.inner.write().await;
        inner.status = AuthStatus::Unauthenticated;
        inner.user = None;
    }

    pub(crate) async fn replace_user(&self, user: User) {
        self.inner.write().await.user = Some(user);
    }
}
