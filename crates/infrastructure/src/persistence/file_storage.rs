//! JSON-file client storage.
//!
//! Persists the dashboard's local key/value pairs (bearer token, cached
//! role and username) as a single JSON object on disk. The storage port
//! is infallible at the seam: I/O failures are logged and degrade to
//! "key absent" so an auth flow never fails over a storage hiccup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use atrium_application::ports::ClientStorage;

/// File-backed `ClientStorage`.
pub struct FileClientStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles on the backing file.
    write_lock: Mutex<()>,
}

impl FileClientStorage {
    /// Creates storage backed by the given file path.
    ///
    /// The file is created on first write; a missing file reads as empty.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> BTreeMap<String, String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|error| {
                tracing::warn!(%error, path = %self.path.display(), "client storage file is corrupt, starting empty");
                BTreeMap::new()
            }),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "failed to read client storage");
                BTreeMap::new()
            }
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) {
        let contents = match serde_json::to_string_pretty(map) {
            Ok(contents) => contents,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize client storage");
                return;
            }
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty())
            && let Err(error) = tokio::fs::create_dir_all(parent).await
        {
            tracing::warn!(%error, "failed to create client storage directory");
            return;
        }
        if let Err(error) = tokio::fs::write(&self.path, contents).await {
            tracing::warn!(%error, path = %self.path.display(), "failed to write client storage");
        }
    }
}

#[async_trait]
impl ClientStorage for FileClientStorage {
    async fn get(&self, key: &str) -> Option<String> {
        self.read_map().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await;
    }

    async fn remove(&self, key: &str) {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await;
        if map.remove(key).is_some() {
            self.write_map(&map).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileClientStorage::new(dir.path().join("session.json"));
        assert!(storage.get("access_token").await.is_none());
    }

    #[tokio::test]
    async fn test_set_get_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileClientStorage::new(dir.path().join("session.json"));

        storage.set("access_token", "tok").await;
        storage.set("role", "admin").await;
        assert_eq!(storage.get("access_token").await.as_deref(), Some("tok"));
        assert_eq!(storage.get("role").await.as_deref(), Some("admin"));

        storage.remove("access_token").await;
        assert!(storage.get("access_token").await.is_none());
        // Other keys are untouched.
        assert_eq!(storage.get("role").await.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        FileClientStorage::new(&path).set("access_token", "tok").await;

        let reopened = FileClientStorage::new(&path);
        assert_eq!(reopened.get("access_token").await.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let storage = FileClientStorage::new(&path);
        assert!(storage.get("access_token").await.is_none());
    }
}
