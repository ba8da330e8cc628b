//! Legacy fallback extraction.
//!
//! Older documents predate the embedded machine-readable block, and newer
//! ones may arrive with the block truncated or mangled by a misbehaving
//! gateway. This shim recovers what it can from textual patterns: the title
//! from the first heading (or `<title>`), the body from the raw-source
//! block, author/category/created-at from meta attributes. It never fails —
//! it returns best-effort partial data and leaves validation to the caller.
//!
//! No HTML parser crate is involved: the patterns are marker-delimited by
//! construction, so plain scanning is sufficient and keeps the shim
//! dependency-free.

use chrono::{DateTime, Utc};

use crate::envelope::{ArticleContent, RAW_SOURCE_BLOCK_ID};

/// Recover best-effort article content from a legacy or damaged document.
///
/// Missing pieces come back empty (title/body/author) or defaulted (tags
/// empty, created-at now). `schema_version` is 0 to mark a pre-envelope
/// recovery.
pub fn recover(document: &str) -> ArticleContent {
    let title = tag_inner(document, "h1")
        .or_else(|| tag_inner(document, "title"))
        .map(|s| unescape_html(s.trim()))
        .unwrap_or_default();
    let body = element_inner_by_id(document, RAW_SOURCE_BLOCK_ID)
        .map(|s| unescape_html(s.trim()))
        .unwrap_or_default();
    let author_address = meta_content(document, "author").unwrap_or_default();
    let category = meta_content(document, "category");
    let tags = meta_content(document, "keywords")
        .map(|s| {
            s.split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();
    let created_at = meta_content(document, "created-at")
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    ArticleContent {
        schema_version: 0,
        title,
        body,
        author_address,
        category,
        tags,
        created_at,
        banner: None,
    }
}

/// Inner text of the first `<tag …>…</tag>` element.
pub(crate) fn tag_inner<'a>(document: &'a str, tag: &str) -> Option<&'a str> {
    let start = document.find(&format!("<{tag}"))?;
    let open_end = document[start..].find('>')? + start + 1;
    let close_pos = document[open_end..].find(&format!("</{tag}>"))? + open_end;
    Some(&document[open_end..close_pos])
}

/// Inner text of the element carrying `id="<id>"`, whatever its tag name.
pub(crate) fn element_inner_by_id<'a>(document: &'a str, id: &str) -> Option<&'a str> {
    let attr_pos = document.find(&format!("id=\"{id}\""))?;
    let tag_start = document[..attr_pos].rfind('<')?;
    let name_end = document[tag_start + 1..]
        .find(|c: char| c.is_whitespace() || c == '>')?
        + tag_start
        + 1;
    let tag_name = &document[tag_start + 1..name_end];
    let open_end = document[attr_pos..].find('>')? + attr_pos + 1;
    let close_pos = document[open_end..].find(&format!("</{tag_name}>"))? + open_end;
    Some(&document[open_end..close_pos])
}

/// The `content` attribute of the first `<meta name="<name>" …>` tag.
pub(crate) fn meta_content(document: &str, name: &str) -> Option<String> {
    let name_attr = format!("name=\"{name}\"");
    let mut rest = document;
    while let Some(pos) = rest.find("<meta") {
        let after = &rest[pos..];
        let end = after.find('>')?;
        let tag = &after[..end];
        if tag.contains(&name_attr) {
            if let Some(cpos) = tag.find("content=\"") {
                let value = &tag[cpos + "content=\"".len()..];
                if let Some(quote) = value.find('"') {
                    return Some(unescape_html(&value[..quote]));
                }
            }
            return None;
        }
        rest = &after[end..];
    }
    None
}

/// Escape text for embedding in markup.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape_html`]. `&amp;` is decoded last so that
/// double-escaped text survives one round trip per call.
pub(crate) fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
