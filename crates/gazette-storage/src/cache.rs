//! In-memory fetch cache.
//!
//! Process-wide, keyed by `(reference, access kind)`. Entries are immutable
//! once written (content-addressed bytes never change under a reference),
//! so concurrent fetches that both miss and both populate are harmless —
//! no locking beyond the map guard is needed.
//!
//! Eviction is explicit only: after a known re-publish the caller must
//! invalidate the stale reference. There is no time-based expiry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use gazette_core::StorageRef;

/// How a reference was accessed through a gateway.
///
/// The same reference may be cached under both kinds (e.g. a manifest
/// fetched as a document and as raw bytes), so the kind is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Manifest-style path access (`/manifest-access/{ref}/{path}`).
    Manifest,
    /// Direct byte access (`/byte-access/{ref}`).
    Bytes,
}

/// Process-wide cache of fetched content.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: RwLock<HashMap<(String, AccessKind), Arc<Vec<u8>>>>,
}

impl FetchCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up cached bytes for a reference and access kind.
    pub fn get(&self, reference: &StorageRef, kind: AccessKind) -> Option<Arc<Vec<u8>>> {
        self.entries
            .read()
            .get(&(reference.as_str().to_string(), kind))
            .cloned()
    }

    /// Insert fetched bytes. A concurrent insert under the same key simply
    /// replaces identical content.
    pub fn insert(&self, reference: &StorageRef, kind: AccessKind, bytes: Arc<Vec<u8>>) {
        self.entries
            .write()
            .insert((reference.as_str().to_string(), kind), bytes);
    }

    /// Remove every entry for a reference (both access kinds).
    pub fn invalidate(&self, reference: &StorageRef) {
        let mut entries = self.entries.write();
        entries.remove(&(reference.as_str().to_string(), AccessKind::Manifest));
        entries.remove(&(reference.as_str().to_string(), AccessKind::Bytes));
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
