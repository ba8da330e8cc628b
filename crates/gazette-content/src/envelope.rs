//! The article document envelope.
//!
//! One artifact serves two readers: a browser rendering the markup and the
//! engine parsing the embedded record. The record is the source of truth;
//! the markup exists so that a bare gateway link to the document is still a
//! readable page.
//!
//! ## Format
//!
//! A schema-versioned JSON record inside a delimited block
//! (`<script type="application/json" id="gazette-article">`), the escaped
//! markdown source inside `<template id="gazette-source">`, and the usual
//! title/meta markup. Extraction prefers the record; the
//! [`fallback`](crate::fallback) shim covers legacy documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gazette_core::{ArticleKind, ArticleRecord, StorageRef};

use crate::error::ContentError;
use crate::fallback;

/// Current schema version written into every new document.
pub const SCHEMA_VERSION: u32 = 1;

/// Element id of the embedded machine-readable block.
pub const METADATA_BLOCK_ID: &str = "gazette-article";

/// Element id of the raw markdown source block.
pub const RAW_SOURCE_BLOCK_ID: &str = "gazette-source";

/// The structured article record embedded in every published document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleContent {
    /// Envelope schema version. 0 marks content recovered by the legacy
    /// fallback shim; new documents always carry [`SCHEMA_VERSION`].
    pub schema_version: u32,
    /// Article title.
    pub title: String,
    /// Markdown source of the article body.
    pub body: String,
    /// Chain address of the author.
    #[serde(default)]
    pub author_address: String,
    /// Editorial category, if assigned.
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
}

impl ArticleContent {
    /// Create content with the current schema version and the required
    /// fields; category, tags, and banner start empty.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author_address: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            title: title.into(),
            body: body.into(),
            author_address: author_address.into(),
            category: None,
            tags: Vec::new(),
            created_at,
            banner: None,
        }
    }

    /// Whether both title and body are non-empty — the bar extraction
    /// must clear on at least one path.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.body.trim().is_empty()
    }

    /// Render the canonical dual-purpose document.
    pub fn to_document(&self) -> Result<String, ContentError> {
        // `</` must not appear inside the script block (it would terminate
        // the element early); `<\/` is the JSON-equivalent escape.
        let record = serde_json::to_string(self)?.replace("</", "<\\/");

        let title = fallback::escape_html(&self.title);
        let body = fallback::escape_html(&self.body);
        let author = fallback::escape_html(&self.author_address);

        let mut head = String::new();
        head.push_str(&format!("<title>{title}</title>\n"));
        head.push_str(&format!("<meta name=\"author\" content=\"{author}\">\n"));
        head.push_str(&format!(
            "<meta name=\"created-at\" content=\"{}\">\n",
            self.created_at.to_rfc3339()
        ));
        if let Some(category) = &self.category {
            head.push_str(&format!(
                "<meta name=\"category\" content=\"{}\">\n",
                fallback::escape_html(category)
            ));
        }
        if !self.tags.is_empty() {
            head.push_str(&format!(
                "<meta name=\"keywords\" content=\"{}\">\n",
                fallback::escape_html(&self.tags.join(", "))
            ));
        }

        Ok(format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             {head}\
             </head>\n\
             <body>\n\
             <script type=\"application/json\" id=\"{METADATA_BLOCK_ID}\">{record}</script>\n\
             <article>\n\
             <h1>{title}</h1>\n\
             <template id=\"{RAW_SOURCE_BLOCK_ID}\">{body}</template>\n\
             </article>\n\
             </body>\n\
             </html>\n"
        ))
    }

    /// Convert into a presentation record with the given display kind.
    pub fn into_record(self, kind: ArticleKind) -> ArticleRecord {
        ArticleRecord {
            title: self.title,
            body: self.body,
            author_address: self.author_address,
            category: self.category,
            tags: self.tags,
            created_at: self.created_at,
            banner: self.banner,
            kind,
        }
    }
}

impl From<ArticleRecord> for ArticleContent {
    fn from(record: ArticleRecord) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            title: record.title,
            body: record.body,
            author_address: record.author_address,
            category: record.category,
            tags: record.tags,
            created_at: record.created_at,
            banner: record.banner,
        }
    }
}

/// Extract article content from fetched document bytes.
///
/// Primary path: parse the delimited machine-readable block and validate
/// it has a non-empty title and body. Fallback path: textual recovery via
/// the legacy shim, which never raises. Only when neither path clears the
/// title+body bar does this return [`ContentError::Malformed`].
pub fn extract(bytes: &[u8], mime_hint: Option<&str>) -> Result<ArticleContent, ContentError> {
    let document = String::from_utf8_lossy(bytes);

    // A bare JSON record (e.g. fetched straight from byte access) skips
    // the markup scan entirely.
    if mime_hint.is_some_and(|m| m.split(';').next().unwrap_or(m).trim() == "application/json") {
        if let Ok(content) = serde_json::from_slice::<ArticleContent>(bytes) {
            if content.is_complete() {
                return Ok(content);
            }
        }
    }

    if let Some(block) = fallback::element_inner_by_id(&document, METADATA_BLOCK_ID) {
        match serde_json::from_str::<ArticleContent>(block) {
            Ok(content) if content.is_complete() => return Ok(content),
            Ok(_) => {
                tracing::debug!("embedded record incomplete, trying fallback recovery");
            }
            Err(e) => {
                tracing::debug!("embedded record unparseable, trying fallback recovery: {e}");
            }
        }
    }

    let recovered = fallback::recover(&document);
    if recovered.is_complete() {
        return Ok(recovered);
    }
    Err(ContentError::Malformed)
}
