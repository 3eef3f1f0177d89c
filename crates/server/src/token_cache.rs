//! Process-wide carrier token cache.
//!
//! Minimizes calls to the identity endpoint by caching the bearer token
//! until its expiry. Constructed once per process and shared by
//! reference; the clock and exchanger are injected so tests can run
//! against fakes.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use atrium_domain::CarrierToken;

use crate::carrier::GrantExchanger;
use crate::clock::Clock;
use crate::error::ProxyError;

/// Cached client-credentials token with single-flight refresh.
pub struct CarrierTokenCache {
    cached: RwLock<Option<CarrierToken>>,
    // Serializes grant exchanges so concurrent expired-cache callers
    // perform exactly one upstream grant.
    refresh_gate: Mutex<()>,
    exchanger: Arc<dyn GrantExchanger>,
    clock: Arc<dyn Clock>,
}

impl CarrierTokenCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(exchanger: Arc<dyn GrantExchanger>, clock: Arc<dyn Clock>) -> Self {
        Self {
            cached: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            exchanger,
            clock,
        }
    }

    /// Returns a valid bearer token, refreshing it if needed.
    ///
    /// A cached token whose expiry is strictly in the future is returned
    /// without any network call. On grant failure the cache is left
    /// unchanged; there is no negative caching.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::AuthBackendUnavailable`] if the grant
    /// exchange fails.
    pub async fn get_token(&self) -> Result<String, ProxyError> {
        if let Some(token) = self.valid_cached().await {
            return Ok(token);
        }

        let _gate = self.refresh_gate.lock().await;
        // Another caller may have refreshed while we waited on the gate.
        if let Some(token) = self.valid_cached().await {
            return Ok(token);
        }

        let grant = self.exchanger.exchange().await?;
        let token = CarrierToken::new(grant.access_token, self.clock.now(), grant.expires_in);
        tracing::debug!(expires_at = %token.expires_at, "carrier token refreshed");
        let access_token = token.access_token.clone();
        *self.cached.write().await = Some(token);
        Ok(access_token)
    }

    /// The currently cached token, if any, regardless of validity.
    pub async fn current(&self) -> Option<CarrierToken> {
        self.cached.read().await.clone()
    }

    async fn valid_cached(&self) -> Option<String> {
        let now = self.clock.now();
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_valid(now))
            .map(|token| token.access_token.clone())
    }
}
