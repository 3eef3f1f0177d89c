//! Backend API adapters.

mod client;

use std::sync::Arc;

use atrium_application::auth::{AuthManager, AuthState, ResponseInterceptor, SessionStore};
use atrium_application::error::ApiResult;
use atrium_application::ports::{AuthApi, ClientStorage, Clock};

use crate::adapters::SystemClock;

pub use client::{ClientConfig, ReqwestAuthApi};

/// Wires the client-side auth subsystem against the configured backend.
///
/// The interceptor handed to the HTTP adapter is the same instance the
/// manager activates and deactivates, so rotation capture and forced
/// sign-out take effect on every request the adapter makes.
///
/// # Errors
///
/// Returns an error if the HTTP adapter cannot be constructed.
pub fn build_auth_manager(
    config: &ClientConfig,
    storage: Arc<dyn ClientStorage>,
) -> ApiResult<AuthManager> {
    let session = SessionStore::new(storage, Arc::new(SystemClock::new()) as Arc<dyn Clock>);
    let state = AuthState::new();
    let interceptor = Arc::new(ResponseInterceptor::new(
        session.clone(),
        state.clone(),
        config.rotation_header_enabled,
    ));
    let api = Arc::new(ReqwestAuthApi::new(
        config,
        session.clone(),
        Arc::clone(&interceptor),
    )?) as Arc<dyn AuthApi>;
    Ok(AuthManager::new(state, session, api, interceptor))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use atrium_application::ports::MemoryStorage;
    use atrium_domain::AuthStatus;
    use url::Url;

    #[tokio::test]
    async fn test_build_wires_state_in_configuring() {
        let config = ClientConfig {
            base_url: Url::parse("https://api.example.com/").unwrap(),
            rotation_header_enabled: true,
        };
        let manager = build_auth_manager(&config, Arc::new(MemoryStorage::new())).unwrap();
        assert_eq!(manager.state().status().await, AuthStatus::Configuring);
        assert!(manager.session().read().await.is_none());
    }
}
