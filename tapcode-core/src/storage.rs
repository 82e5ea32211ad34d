//! Key-value persistence behind the engine.
//!
//! The host app brings the real store (on-device preferences behind the
//! platform bridge); the crate ships an in-memory store for tests and a
//! JSON-file store for desktop builds. Everything persisted goes through
//! [`KeyValueStore`] as plain strings.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed storage payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// For host-supplied stores bridging platform errors.
    #[error("storage backend: {0}")]
    Backend(String),
}

/// String-valued async key-value store.
///
/// An absent key is `Ok(None)`; errors are reserved for the backend itself
/// failing.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Volatile store for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: parking_lot::Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// The whole map lives in memory and every mutation rewrites the file. The
/// mutex is held across the write so concurrent mutations cannot race a
/// stale snapshot onto disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: tokio::sync::Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens `path` and loads any existing entries.
    ///
    /// A missing file starts empty. An unreadable or malformed file also
    /// starts empty with a logged warning and is rewritten on the next
    /// mutation.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    log::warn!("malformed store file {}, starting empty: {err}", path.display());
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                log::warn!("unreadable store file {}, starting empty: {err}", path.display());
                HashMap::new()
            }
        };
        Self { path, entries: tokio::sync::Mutex::new(entries) }
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        self.persist(&entries).await
    }
}
