//! Postage batch resolution.
//!
//! Every write needs a usable postage batch (a pre-purchased write-capacity
//! voucher). [`BatchResolver`] hides the batch lifecycle behind a three-tier
//! fallback:
//!
//! 1. An explicit id that passes the strict format check is returned
//!    immediately, with no network call.
//! 2. Otherwise the node's batches are listed; the usable batch with the
//!    greatest remaining capacity wins (ties keep the first encountered,
//!    which is implementation-defined — the listing order is not stable).
//!    The winner is persisted as the new default for future calls.
//! 3. If nothing is usable: in dev mode, the all-zero placeholder id with a
//!    warning; in production, [`StorageError::NoUsableCapacity`].
//!
//! The resolver is an explicit, injectable object — not a hidden singleton —
//! so tests can construct independent resolvers. Its shared state is the
//! persisted default id; concurrent resolutions may race to set it, and
//! last-write-wins is correct since any usable batch is a valid choice.

use std::sync::Arc;

use serde::Deserialize;

use gazette_core::BatchId;

use crate::error::StorageError;
use crate::node::NodeClient;
use crate::store::KeyValueStore;

/// Key under which the last resolved batch id is persisted.
pub const LAST_BATCH_KEY: &str = "postage/last-batch-id";

/// A postage batch as reported by the node.
///
/// Exhaustion is observed, never mutated, by this engine: a batch that was
/// usable on the last write may come back `usable: false` on the next
/// listing, at which point resolution simply picks another.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostageBatch {
    /// Batch identifier.
    pub batch_id: BatchId,
    /// Whether the batch can currently stamp new uploads.
    pub usable: bool,
    /// Remaining write capacity, in node-defined units.
    pub remaining_capacity: u64,
}

/// Finds or validates a usable postage batch before any upload.
pub struct BatchResolver {
    node: Arc<NodeClient>,
    store: Arc<dyn KeyValueStore>,
    dev_mode: bool,
}

impl BatchResolver {
    /// Create a resolver over a node client and a local state store.
    ///
    /// `dev_mode` enables the placeholder fallback when no usable batch
    /// exists; production callers must leave it off so that writes fail
    /// loudly instead of producing uploads no node will accept.
    pub fn new(node: Arc<NodeClient>, store: Arc<dyn KeyValueStore>, dev_mode: bool) -> Self {
        Self {
            node,
            store,
            dev_mode,
        }
    }

    /// Resolve a batch id for the next write.
    ///
    /// `explicit` takes precedence when it passes the strict format check;
    /// otherwise the persisted default is tried, then discovery. An invalid
    /// explicit id falls through to discovery rather than failing — the
    /// caller asked for "a usable batch", not "this exact string".
    pub async fn resolve(&self, explicit: Option<&str>) -> Result<BatchId, StorageError> {
        if let Some(candidate) = explicit {
            if let Ok(id) = BatchId::new(candidate) {
                return Ok(id);
            }
            tracing::warn!(candidate, "explicit batch id failed format check, discovering instead");
        } else if let Some(saved) = self.last_known() {
            return Ok(saved);
        }

        let batches = self.node.list_batches().await?;
        let best = batches
            .into_iter()
            .filter(|b| b.usable)
            // Strictly-greater keeps the first encountered on ties.
            .fold(None::<PostageBatch>, |best, b| match best {
                Some(current) if b.remaining_capacity > current.remaining_capacity => Some(b),
                Some(current) => Some(current),
                None => Some(b),
            });

        if let Some(batch) = best {
            self.store.set(LAST_BATCH_KEY, batch.batch_id.as_str());
            tracing::debug!(batch = %batch.batch_id, capacity = batch.remaining_capacity, "resolved postage batch");
            return Ok(batch.batch_id);
        }

        if self.dev_mode {
            tracing::warn!("no usable postage batch found, falling back to placeholder (dev mode)");
            return Ok(BatchId::placeholder());
        }
        Err(StorageError::NoUsableCapacity)
    }

    /// The persisted default batch id, if one is stored and well-formed.
    pub fn last_known(&self) -> Option<BatchId> {
        self.store
            .get(LAST_BATCH_KEY)
            .and_then(|s| BatchId::new(&s).ok())
    }

    /// Drop the persisted default so the next resolution re-queries the
    /// node. Call this after observing that the previously selected batch
    /// is no longer usable (e.g. an upload rejected for exhaustion).
    pub fn forget_last_known(&self) {
        self.store.remove(LAST_BATCH_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn postage_batch_deserializes() {
        let json = format!(
            r#"{{"batch_id":"{}","usable":true,"remaining_capacity":42}}"#,
            "c".repeat(64)
        );
        let batch: PostageBatch = serde_json::from_str(&json).unwrap();
        assert!(batch.usable);
        assert_eq!(batch.remaining_capacity, 42);
    }

    #[test]
    fn last_known_ignores_malformed_stored_value() {
        let store = Arc::new(MemoryStore::new());
        store.set(LAST_BATCH_KEY, "garbage");

        let node = Arc::new(
            NodeClient::new(&crate::config::NodeConfig::new("http://127.0.0.1:1")).unwrap(),
        );
        let resolver = BatchResolver::new(node, store, true);
        assert!(resolver.last_known().is_none());
    }

    #[test]
    fn forget_last_known_clears_store() {
        let store = Arc::new(MemoryStore::new());
        store.set(LAST_BATCH_KEY, &"d".repeat(64));

        let node = Arc::new(
            NodeClient::new(&crate::config::NodeConfig::new("http://127.0.0.1:1")).unwrap(),
        );
        let resolver = BatchResolver::new(node, store.clone(), false);
        assert!(resolver.last_known().is_some());
        resolver.forget_last_known();
        assert!(store.get(LAST_BATCH_KEY).is_none());
    }
}
