//! Content envelope error types.

use thiserror::Error;

/// Errors from building or extracting article documents.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Neither the embedded record nor the fallback shim recovered a
    /// non-empty title and body. Partial or degraded data never raises
    /// this — it signals total failure only.
    #[error("content malformed: no recoverable title and body")]
    Malformed,

    /// The metadata record could not be serialized into the document.
    #[error("metadata block serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
