//! Storage transport error types.
//!
//! One taxonomy for both paths: write errors carry a context tag
//! (`upload-failed`, `publish-failed`, `batch-discovery`) and the failing
//! endpoint; the read path raises only [`StorageError::ContentUnavailable`]
//! with the full list of attempted gateways.

use gazette_core::{StorageRef, ValidationError};

/// Errors from storage network operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No usable postage batch is available and the placeholder fallback
    /// is disabled (production mode). Writes are blocked until capacity
    /// is purchased.
    #[error("no usable postage batch available")]
    NoUsableCapacity,

    /// HTTP transport failure (connection, timeout) during a write-path call.
    #[error("{context}: HTTP error calling {endpoint}: {source}")]
    Http {
        /// Context tag: which operation failed (`upload-failed`, …).
        context: &'static str,
        /// The endpoint URL that was called.
        endpoint: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The node returned a non-2xx status during a write-path call.
    #[error("{context}: node {endpoint} returned {status}: {body}")]
    Api {
        /// Context tag: which operation failed.
        context: &'static str,
        /// The endpoint URL that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body excerpt for diagnostics.
        body: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// The endpoint URL that was called.
        endpoint: String,
        /// The underlying error.
        source: reqwest::Error,
    },

    /// Every configured gateway failed to serve the reference.
    #[error("content unavailable for {reference}: {} gateway attempt(s) failed", attempted.len())]
    ContentUnavailable {
        /// The reference that could not be fetched.
        reference: StorageRef,
        /// Every endpoint URL that was attempted, in order.
        attempted: Vec<String>,
    },

    /// Configuration error (malformed base URL, empty gateway list, …).
    #[error("configuration error: {0}")]
    Config(String),

    /// A domain primitive failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
