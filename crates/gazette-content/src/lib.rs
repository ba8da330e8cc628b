//! # gazette-content — Article Document Envelope
//!
//! Every published article is one dual-purpose document: human-viewable
//! markup and a machine-parseable record in the same artifact. This crate
//! owns both directions:
//!
//! - [`ArticleContent::to_document`] renders the canonical document — a
//!   schema-versioned JSON record in a clearly delimited block, plus
//!   readable title/body/meta markup and a raw-source block.
//! - [`extract`] recovers the record from fetched bytes: the embedded JSON
//!   block is the fast path and source of truth; a textual fallback shim
//!   handles legacy documents that predate the structured block. Only when
//!   neither path yields a non-empty title and body does extraction fail.

pub mod envelope;
pub mod error;
pub mod fallback;

pub use envelope::{extract, ArticleContent, METADATA_BLOCK_ID, RAW_SOURCE_BLOCK_ID, SCHEMA_VERSION};
pub use error::ContentError;
