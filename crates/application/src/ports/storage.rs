//! Durable client storage port.
//!
//! Models the dashboard's local key/value storage. Operations are
//! infallible at this seam: adapters handle their own I/O failures and
//! degrade to "key absent" rather than failing an auth flow over a
//! storage hiccup.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Port for durable client-side key/value storage.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Returns the stored value for `key`, or `None`.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str);

    /// Removes `key` if present.
    async fn remove(&self, key: &str);
}

/// In-memory `ClientStorage` for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ClientStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    async fn remove(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.get("access_token").await.is_none());

        storage.set("access_token", "tok-1").await;
        assert_eq!(storage.get("access_token").await.as_deref(), Some("tok-1"));

        storage.set("access_token", "tok-2").await;
        assert_eq!(storage.get("access_token").await.as_deref(), Some("tok-2"));

        storage.remove("access_token").await;
        assert!(storage.get("access_token").await.is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_noop() {
        let storage = MemoryStorage::new();
        storage.remove("missing").await;
        assert!(storage.is_empty().await);
    }
}
