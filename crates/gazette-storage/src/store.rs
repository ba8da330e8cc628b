//! Key/value seam for persisted local state.
//!
//! The engine itself owns no persistence: the last-known postage batch id
//! (and, in the browser-facing deployment, drafts pending upload) live in
//! whatever store the host provides. This module is that seam — a plain
//! get/set/remove capability, not a storage design of its own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

/// A string-keyed get/set/remove capability.
///
/// Implementations must be safe to share across tasks; last-write-wins
/// under concurrent sets is acceptable for every key the engine uses.
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;
    /// Set a key to a value, replacing any previous value.
    fn set(&self, key: &str, value: &str);
    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store. Used by tests and by callers that do not want
/// persistence across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// File-backed store: one JSON object per file, rewritten on every change.
///
/// Write failures are logged and swallowed — local state is advisory (a
/// lost batch id only costs one extra discovery round trip on the next
/// write), so it must never fail a publish.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store at the given path, loading existing entries if the
    /// file exists and parses. A missing or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<HashMap<String, String>>(&bytes)
                .unwrap_or_else(|e| {
                    tracing::warn!(path = %path.display(), "local state file is corrupt, starting empty: {e}");
                    HashMap::new()
                }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, snapshot: &HashMap<String, String>) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let bytes = serde_json::to_vec_pretty(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(&self.path, bytes)
        };
        if let Err(e) = write() {
            tracing::warn!(path = %self.path.display(), "failed to persist local state: {e}");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write();
        entries.remove(key);
        self.persist(&entries);
    }
}
