//! File-backed session store.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use sshx_connect_core::{ConnectionBook, SessionRecord};
use thiserror::Error;

const CONFIG_FILE: &str = "config.json";

/// Storage error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("config file {} is not valid JSON: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("session not found: {0}")]
    NotFound(String),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed store for saved connections.
///
/// The whole document is read into memory for every operation and written
/// back whole. There is no lock on the file: two processes mutating it at
/// once race with last-writer-wins. Fine for a single-operator local tool.
#[derive(Debug, Clone)]
pub struct SessionStore {
    config_file: PathBuf,
}

impl SessionStore {
    /// Create a store backed by `<config_dir>/config.json`.
    #[must_use]
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_file: config_dir.into().join(CONFIG_FILE),
        }
    }

    /// The per-user default config directory (`~/.sshx`).
    ///
    /// `None` if the home directory cannot be determined.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sshx"))
    }

    /// Path of the backing config file.
    #[must_use]
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Read the full document from disk.
    ///
    /// A missing file is not an error: it yields an empty book.
    ///
    /// # Errors
    /// [`StoreError::Corrupt`] if the file exists but is not valid JSON;
    /// [`StoreError::Io`] on any other read failure.
    pub async fn load(&self) -> Result<ConnectionBook, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.config_file).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.config_file.display(), "no config file yet");
                return Ok(ConnectionBook::default());
            }
            Err(err) => return Err(err.into()),
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: self.config_file.clone(),
            source,
        })
    }

    /// Serialize the document and overwrite the config file.
    ///
    /// Creates the config directory first if it is absent.
    ///
    /// # Errors
    /// [`StoreError::Io`] on permission or disk failures.
    pub async fn save(&self, book: &ConnectionBook) -> Result<(), StoreError> {
        if let Some(dir) = self.config_file.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let json = serde_json::to_string_pretty(book)?;
        tokio::fs::write(&self.config_file, json).await?;

        tracing::debug!(
            path = %self.config_file.display(),
            connections = book.connections.len(),
            "saved config"
        );
        Ok(())
    }

    /// Insert or replace the record for `name` and persist.
    ///
    /// A replaced record keeps its original creation time.
    ///
    /// # Errors
    /// Returns error if the document cannot be read or written.
    pub async fn upsert(&self, name: &str, url: &str) -> Result<(), StoreError> {
        let mut book = self.load().await?;
        book.upsert(name, url.to_string(), now());
        self.save(&book).await
    }

    /// Mark an existing record as used right now and persist.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if `name` is not saved.
    pub async fn touch(&self, name: &str) -> Result<(), StoreError> {
        let mut book = self.load().await?;
        if !book.touch(name, now()) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.save(&book).await
    }

    /// All saved records as (name, record) pairs, sorted by name.
    ///
    /// # Errors
    /// Returns error if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<(String, SessionRecord)>, StoreError> {
        let book = self.load().await?;
        Ok(book
            .sorted()
            .into_iter()
            .map(|(name, record)| (name.to_string(), record.clone()))
            .collect())
    }
}

fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> SessionStore {
        SessionStore::new(tmp.path())
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let book = store_in(&tmp).load().await.unwrap();
        assert!(book.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.upsert("default", "https://x/s/AAA#BBB").await.unwrap();

        let book = store.load().await.unwrap();
        let record = book.get("default").unwrap();
        assert_eq!(record.url, "https://x/s/AAA#BBB");
        assert_eq!(record.created_at, record.last_used);
        assert_eq!(book.last_connection.as_deref(), Some("default"));
    }

    #[tokio::test]
    async fn test_save_creates_config_dir() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path().join("deep").join("nested"));

        store.upsert("work", "https://x/s/AAA").await.unwrap();
        assert!(store.config_file().is_file());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        std::fs::write(store.config_file(), "{not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_without_duplicating() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.upsert("work", "https://x/s/AAA").await.unwrap();
        let created = store.load().await.unwrap().get("work").unwrap().created_at;

        store.upsert("work", "https://x/s/BBB").await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        let (name, record) = &listed[0];
        assert_eq!(name, "work");
        assert_eq!(record.url, "https://x/s/BBB");
        assert_eq!(record.created_at, created);
        assert!(record.last_used > record.created_at);
    }

    #[tokio::test]
    async fn test_touch_bumps_last_used_only() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.upsert("work", "https://x/s/AAA").await.unwrap();
        let before = store.load().await.unwrap().get("work").unwrap().clone();

        store.touch("work").await.unwrap();

        let after = store.load().await.unwrap().get("work").unwrap().clone();
        assert_eq!(after.url, before.url);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.last_used > before.last_used);
    }

    #[tokio::test]
    async fn test_touch_unknown_name_fails() {
        let tmp = TempDir::new().unwrap();
        let err = store_in(&tmp).touch("missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_list_is_name_sorted() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.upsert("zeta", "https://x/s/ZZZ").await.unwrap();
        store.upsert("alpha", "https://x/s/AAA").await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }
}
