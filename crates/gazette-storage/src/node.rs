//! Write-side node client.
//!
//! Wraps a `reqwest::Client` with the node base URL and request/response
//! mapping for the four write-transport operations: list postage batches,
//! upload bytes, upload a manifest, and publish a signed pointer.
//!
//! ## Error Handling
//!
//! HTTP errors are mapped to [`StorageError`] with a context tag, the
//! endpoint URL, the HTTP status, and a response body excerpt. No retries
//! are performed here — retry policy belongs to the caller.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use gazette_core::{BatchId, StorageRef};

use crate::config::NodeConfig;
use crate::error::StorageError;
use crate::postage::PostageBatch;

/// Request header carrying the postage batch id on uploads.
pub const BATCH_HEADER: &str = "x-postage-batch";

/// Maximum response body length kept in error diagnostics.
const BODY_EXCERPT_LEN: usize = 256;

/// One named entry of a manifest upload: a path, its content type, and the
/// bytes to store under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path within the manifest (e.g. `index.html`, `images/banner.png`).
    pub path: String,
    /// MIME content type of the bytes.
    pub content_type: String,
    /// The content bytes.
    pub data: Vec<u8>,
}

/// The stable address of a signed pointer, derived from the signing key
/// and independent of the content it points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointerAddress(String);

impl PointerAddress {
    /// Derive the pointer address for a verifying key: the SHA-256 digest
    /// of the key bytes, hex-encoded. Deterministic, so the address is
    /// stable across content updates.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let digest = Sha256::digest(key.to_bytes());
        Self(hex::encode(digest))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PointerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceResponse {
    reference: StorageRef,
}

#[derive(Debug, Deserialize)]
struct PointerResponse {
    address: String,
}

/// HTTP client for the operator's network-access node.
#[derive(Debug)]
pub struct NodeClient {
    client: reqwest::Client,
    base_url: String,
}

impl NodeClient {
    /// Build a node client from configuration.
    pub fn new(config: &NodeConfig) -> Result<Self, StorageError> {
        let base_url = config.base_url()?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StorageError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// The node base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all postage batches known to the node.
    pub async fn list_batches(&self) -> Result<Vec<PostageBatch>, StorageError> {
        let endpoint = format!("{}/batches", self.base_url);
        let resp = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|source| StorageError::Http {
                context: "batch-discovery",
                endpoint: endpoint.clone(),
                source,
            })?;
        let resp = check_status("batch-discovery", &endpoint, resp).await?;
        resp.json::<Vec<PostageBatch>>()
            .await
            .map_err(|source| StorageError::Deserialization { endpoint, source })
    }

    /// Upload a single named resource, returning its content-addressed
    /// reference.
    pub async fn upload_bytes(
        &self,
        batch: &BatchId,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StorageRef, StorageError> {
        let endpoint = format!("{}/resources", self.base_url);
        let resp = self
            .client
            .post(&endpoint)
            .query(&[("name", name)])
            .header(BATCH_HEADER, batch.as_str())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|source| StorageError::Http {
                context: "upload-failed",
                endpoint: endpoint.clone(),
                source,
            })?;
        let resp = check_status("upload-failed", &endpoint, resp).await?;
        let parsed: ReferenceResponse = resp
            .json()
            .await
            .map_err(|source| StorageError::Deserialization { endpoint, source })?;
        tracing::debug!(reference = %parsed.reference, name, "uploaded resource");
        Ok(parsed.reference)
    }

    /// Upload every entry of a collection as one manifest transaction,
    /// stamped with a single postage batch. Returns the manifest reference.
    pub async fn upload_manifest(
        &self,
        batch: &BatchId,
        entries: &[ManifestEntry],
    ) -> Result<StorageRef, StorageError> {
        let endpoint = format!("{}/manifests", self.base_url);
        let body = serde_json::json!({
            "entries": entries
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "path": e.path,
                        "content_type": e.content_type,
                        "data": hex::encode(&e.data),
                    })
                })
                .collect::<Vec<_>>(),
        });
        let resp = self
            .client
            .post(&endpoint)
            .header(BATCH_HEADER, batch.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|source| StorageError::Http {
                context: "upload-failed",
                endpoint: endpoint.clone(),
                source,
            })?;
        let resp = check_status("upload-failed", &endpoint, resp).await?;
        let parsed: ReferenceResponse = resp
            .json()
            .await
            .map_err(|source| StorageError::Deserialization { endpoint, source })?;
        tracing::debug!(reference = %parsed.reference, entries = entries.len(), "uploaded manifest");
        Ok(parsed.reference)
    }

    /// Publish (create or update) the signed pointer for a signing key so
    /// that it targets the given manifest reference.
    ///
    /// The pointer address is derived from the verifying key alone; the
    /// node verifies the signature over `{address}:{reference}` before
    /// accepting the update.
    pub async fn publish_pointer(
        &self,
        signing_key: &SigningKey,
        reference: &StorageRef,
    ) -> Result<PointerAddress, StorageError> {
        let address = PointerAddress::from_verifying_key(&signing_key.verifying_key());
        let endpoint = format!("{}/pointers/{}", self.base_url, address.as_str());

        let payload = pointer_payload(&address, reference);
        let signature = signing_key.sign(payload.as_bytes());

        let body = serde_json::json!({
            "reference": reference.as_str(),
            "public_key": hex::encode(signing_key.verifying_key().to_bytes()),
            "signature": hex::encode(signature.to_bytes()),
        });
        let resp = self
            .client
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|source| StorageError::Http {
                context: "publish-failed",
                endpoint: endpoint.clone(),
                source,
            })?;
        let resp = check_status("publish-failed", &endpoint, resp).await?;
        let parsed: PointerResponse = resp
            .json()
            .await
            .map_err(|source| StorageError::Deserialization { endpoint, source })?;
        tracing::debug!(address = %parsed.address, reference = %reference, "published pointer");
        Ok(PointerAddress(parsed.address))
    }
}

/// The byte payload a pointer signature covers.
pub(crate) fn pointer_payload(address: &PointerAddress, reference: &StorageRef) -> String {
    format!("{}:{}", address.as_str(), reference.as_str())
}

/// Map a non-2xx response to [`StorageError::Api`] with a body excerpt.
async fn check_status(
    context: &'static str,
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, StorageError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let mut body = resp.text().await.unwrap_or_default();
    if body.len() > BODY_EXCERPT_LEN {
        // Walk back to a char boundary; a multibyte char may straddle the
        // excerpt limit.
        let mut cut = BODY_EXCERPT_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    Err(StorageError::Api {
        context,
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}
