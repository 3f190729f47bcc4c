use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt session file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistent string storage for session credentials, keyed by fixed names.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write all entries together; readers never observe half of a pair.
    async fn write(&self, entries: &[(&str, &str)]) -> Result<(), StoreError>;

    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError>;
}

/// Process-local store, for tests and for embedding the client without disk state.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let map = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn write(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut map = self.lock();
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut map = self.lock();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// JSON object on disk, one member per key plus a `savedAt` timestamp.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

const SAVED_AT_KEY: &str = "savedAt";

impl FileTokenStore {
    pub const FILE_NAME: &'static str = "session.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, mut map: Map<String, Value>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        map.insert(SAVED_AT_KEY.to_string(), Value::String(Utc::now().to_rfc3339()));
        let content = serde_json::to_string_pretty(&map).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        // Write-then-rename so a crash never leaves a truncated session file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await.map_err(io_err)?;
        restrict_permissions(&tmp).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.load().await?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    async fn write(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut map = self.load().await?;
        for (key, value) in entries {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
        self.save(map).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut map = self.load().await?;
        for key in keys {
            map.remove(*key);
        }

        let only_metadata = map.keys().all(|k| k == SAVED_AT_KEY);
        if only_metadata {
            return match tokio::fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                }),
            };
        }
        self.save(map).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips_pairs() {
        let store = MemoryTokenStore::new();
        store.write(&[("accessToken", "A1"), ("refreshToken", "R1")]).await.unwrap();
        assert_eq!(store.read("accessToken").await.unwrap().as_deref(), Some("A1"));

        store.remove(&["accessToken", "refreshToken"]).await.unwrap();
        assert!(store.snapshot().is_empty());
    }
}
