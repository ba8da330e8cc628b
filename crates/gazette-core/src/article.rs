//! # Article Domain Types
//!
//! The presentation-facing article record, its display kind, and the
//! postage batch identifier newtype used on the write path.
//!
//! ## Kind Lifecycle
//!
//! Articles are never created with kind `highlight` directly: the write
//! path produces `h1`, `h2`, or `regular`, and the feed layout engine
//! promotes `regular` articles into `highlight` when their category
//! matches the configured highlight category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::reference::StorageRef;

/// Length of a postage batch identifier in hex characters.
pub const BATCH_ID_HEX_LEN: usize = 64;

/// A validated postage batch identifier (64 lowercase hex characters).
///
/// A batch is a pre-purchased, time/volume-bounded right to write data into
/// the storage network. The inner value cannot be mutated after
/// construction, so the format invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    /// Create a validated batch identifier.
    ///
    /// Trims whitespace and lowercases before validating; returns an error
    /// unless the result is exactly [`BATCH_ID_HEX_LEN`] hex characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let id = s.trim().to_lowercase();
        if id.len() != BATCH_ID_HEX_LEN {
            return Err(ValidationError::InvalidBatchId(format!(
                "expected {BATCH_ID_HEX_LEN} hex chars, got {}",
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidBatchId(
                "contains non-hex characters".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// The all-zero placeholder batch used in non-production contexts when
    /// no usable batch can be discovered. Keeps local development unblocked;
    /// uploads stamped with it are rejected by any real node.
    pub fn placeholder() -> Self {
        Self("0".repeat(BATCH_ID_HEX_LEN))
    }

    /// Whether this is the development placeholder batch.
    pub fn is_placeholder(&self) -> bool {
        self.0.chars().all(|c| c == '0')
    }

    /// The batch identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BatchId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

/// Display kind of an article within the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleKind {
    /// Primary (lead) article slot.
    H1,
    /// Secondary article slot.
    H2,
    /// Highlighted article. Assigned only by the feed layout engine, never
    /// at creation time.
    Highlight,
    /// Regular article.
    Regular,
}

impl std::fmt::Display for ArticleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::H1 => f.write_str("h1"),
            Self::H2 => f.write_str("h2"),
            Self::Highlight => f.write_str("highlight"),
            Self::Regular => f.write_str("regular"),
        }
    }
}

/// An article known to the platform, as tracked for presentation.
///
/// Created by the write path on publish. The `kind` field is the only
/// post-hoc mutable piece: the feed layout engine may promote `regular`
/// to `highlight` based on category configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Article title.
    pub title: String,
    /// Article body (markdown source).
    pub body: String,
    /// Chain address of the author.
    pub author_address: String,
    /// Editorial category, if assigned. An unset category never matches a
    /// highlight category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publication timestamp.
    pub created_at: DateTime<Utc>,
    /// Banner image reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<StorageRef>,
    /// Display kind within the feed.
    pub kind: ArticleKind,
}

impl ArticleRecord {
    /// Create a regular article record with the given required fields.
    ///
    /// `kind` starts as [`ArticleKind::Regular`]; use the struct fields to
    /// assign `h1`/`h2` editorially. `highlight` is reserved for the feed
    /// layout engine.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author_address: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author_address: author_address.into(),
            category: None,
            tags: Vec::new(),
            created_at,
            banner: None,
            kind: ArticleKind::Regular,
        }
    }
}
