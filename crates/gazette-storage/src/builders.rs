//! Write-side builders: resource, collection, website.
//!
//! Three layers over the node client:
//!
//! - [`Resource`] — one named blob, uploaded to a single reference.
//! - [`Collection`] — an ordered, path-keyed set of resources, uploaded as
//!   one manifest transaction under a single postage batch.
//! - [`Website`] — a collection bound to a signing key, giving it a stable
//!   pointer address that survives content updates (the manifest reference
//!   changes on every publish; the address never does).
//!
//! Building is pure and in-memory; only `save()`/`publish()` touch the
//! network. Repeated saves re-upload — there is no dedup here, the network
//! itself deduplicates identical content under identical references.

use ed25519_dalek::SigningKey;

use gazette_core::StorageRef;

use crate::error::StorageError;
use crate::node::{ManifestEntry, NodeClient, PointerAddress};
use crate::postage::BatchResolver;

/// A single named resource: bytes plus a content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
    bytes: Vec<u8>,
    content_type: String,
}

impl Resource {
    /// Create a resource. No network call.
    pub fn new(
        name: impl Into<String>,
        bytes: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: content_type.into(),
        }
    }

    /// The resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve a batch and upload, returning the content-addressed
    /// reference. Errors propagate with their context tag; no retry.
    pub async fn save(
        &self,
        node: &NodeClient,
        resolver: &BatchResolver,
    ) -> Result<StorageRef, StorageError> {
        let batch = resolver.resolve(None).await?;
        node.upload_bytes(&batch, &self.name, &self.content_type, self.bytes.clone())
            .await
    }
}

/// An ordered set of named resources keyed by path.
///
/// Paths are unique within a collection: re-adding a path before upload
/// replaces the earlier entry in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    entries: Vec<ManifestEntry>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an entry. Pure, in-memory, no network call.
    pub fn add(
        &mut self,
        path: impl Into<String>,
        bytes: Vec<u8>,
        content_type: impl Into<String>,
    ) -> &mut Self {
        let entry = ManifestEntry {
            path: path.into(),
            content_type: content_type.into(),
            data: bytes,
        };
        match self.entries.iter_mut().find(|e| e.path == entry.path) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// The entries, in insertion order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upload every entry as one manifest transaction using one resolved
    /// batch for the whole collection. Returns the manifest reference.
    pub async fn save(
        &self,
        node: &NodeClient,
        resolver: &BatchResolver,
    ) -> Result<StorageRef, StorageError> {
        let batch = resolver.resolve(None).await?;
        node.upload_manifest(&batch, &self.entries).await
    }
}

/// Result of a website publish: the stable pointer address and the
/// (per-publish) manifest reference it now targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsitePublish {
    /// Stable, key-derived pointer address.
    pub address: PointerAddress,
    /// The content-addressed manifest reference of this publish.
    pub manifest_reference: StorageRef,
}

/// A mutable website: a collection bound to a signing key.
pub struct Website {
    signing_key: SigningKey,
    /// The content to publish. Mutable between publishes.
    pub collection: Collection,
}

impl Website {
    /// Bind a collection to a signing key.
    pub fn new(signing_key: SigningKey, collection: Collection) -> Self {
        Self {
            signing_key,
            collection,
        }
    }

    /// The stable pointer address for this website, derived from the
    /// signing key alone. Available before any publish.
    pub fn address(&self) -> PointerAddress {
        PointerAddress::from_verifying_key(&self.signing_key.verifying_key())
    }

    /// Publish the collection, then attach/update the signed pointer to
    /// the resulting manifest.
    pub async fn publish(
        &self,
        node: &NodeClient,
        resolver: &BatchResolver,
    ) -> Result<WebsitePublish, StorageError> {
        let manifest_reference = self.collection.save(node, resolver).await?;
        let address = node
            .publish_pointer(&self.signing_key, &manifest_reference)
            .await?;
        Ok(WebsitePublish {
            address,
            manifest_reference,
        })
    }
}
