use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::{Result, StoreError};

/// Durable string-keyed JSON store surviving process restarts.
///
/// The whole map lives in memory behind an `RwLock` and is flushed to disk on
/// every mutation (temp file, then rename, so a crash mid-write leaves the
/// previous file intact). Reads substitute defaults for absent or malformed
/// values and never fail.
#[derive(Clone)]
pub struct LocalStore {
    path: Arc<PathBuf>,
    entries: Arc<RwLock<Map<String, Value>>>,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl LocalStore {
    /// Opens the store at `path`, loading existing contents if present.
    ///
    /// A missing file yields an empty store. A malformed file is logged and
    /// treated as empty rather than raised; the next write replaces it.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Map<String, Value>>(&bytes) {
                Ok(map) => map,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "store file malformed, starting empty");
                    Map::new()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "store file unreadable, starting empty");
                Map::new()
            }
        };

        Self {
            path: Arc::new(path),
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Reads the value under `key`, substituting `T::default()` when the key
    /// is absent or its value does not deserialize.
    pub async fn get<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(parsed) => parsed,
                Err(error) => {
                    tracing::warn!(key, %error, "malformed store value, substituting default");
                    T::default()
                }
            },
            None => T::default(),
        }
    }

    /// Stores `value` under `key` and persists the whole map.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let serialized = serde_json::to_value(value)?;
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), serialized);
        self.persist(&entries).await
    }

    /// Removes `key` and persists. Removing an absent key is a no-op.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries).await
    }

    /// Read-modify-write under a single write guard.
    ///
    /// The closure sees the current value (default-substituted) and mutates
    /// it in place; the result is persisted and returned. No other task can
    /// interleave between the read and the write.
    pub async fn update<T, F>(&self, key: &str, mutate: F) -> Result<T>
    where
        T: DeserializeOwned + Serialize + Default + Clone,
        F: FnOnce(&mut T),
    {
        let mut entries = self.entries.write().await;
        let mut current: T = match entries.get(key) {
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(parsed) => parsed,
                Err(error) => {
                    tracing::warn!(key, %error, "malformed store value, substituting default");
                    T::default()
                }
            },
            None => T::default(),
        };
        mutate(&mut current);
        entries.insert(key.to_string(), serde_json::to_value(current.clone())?);
        self.persist(&entries).await?;
        Ok(current)
    }

    /// Returns the store's backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &Map<String, Value>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(StoreError::FileWrite)?;
        tokio::fs::rename(&tmp, self.path.as_ref())
            .await
            .map_err(StoreError::FileWrite)?;
        Ok(())
    }
}
