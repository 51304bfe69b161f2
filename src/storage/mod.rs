//! Persisted key-value store
//!
//! File-backed analogue of the browser localStorage the player state mirrors
//! into: one JSON document per logical key under a configured directory.
//!
//! Read semantics are deliberately forgiving: a missing file means
//! "collection empty" and a corrupt file is treated as absent, substituting the
//! caller's default without surfacing an error. Write failures do propagate,
//! since losing a mutation is observable.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::StorageResult;

/// Logical key names. Stable across releases; renaming one orphans the
/// previously persisted value.
pub mod keys {
    pub const FAVORITES: &str = "favorites";
    pub const HISTORY: &str = "history";
    pub const THEME: &str = "theme";
    pub const PLAYLISTS: &str = "playlists";
    pub const LAST_URL: &str = "last_url";
}

/// JSON file-per-key store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read the value under `key`, substituting `T::default()` when the key is
    /// absent or its content fails to decode.
    pub fn read_or_default<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.key_path(key);
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => {
                debug!(key, "No persisted value, using default");
                return T::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Discarding corrupt persisted value");
                T::default()
            }
        }
    }

    /// Persist `value` under `key`, replacing any previous value.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let contents = serde_json::to_string_pretty(value)?;
        std::fs::write(self.key_path(key), contents)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
