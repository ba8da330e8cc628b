//! # gazette-feed — Feed Layout Engine
//!
//! A pure function from the full article set to the sectioned presentation
//! structure: primary (`h1`), secondary (`h2`), highlighted, and regular.
//! The same inputs always produce the same [`FeedLayout`]; the presentation
//! layer renders the four sequences and never mutates article kinds itself.
//!
//! ## Highlight promotion
//!
//! The highlighted classification is re-derived from configuration on every
//! run: a `regular` article whose category equals the configured highlight
//! category is promoted to `highlight`. Promotion is idempotent across
//! repeated calls and has no demotion path within a pass — changing the
//! highlight category later simply stops matching new regulars, it does not
//! demote articles already promoted in earlier persisted state.
//!
//! ## Limits
//!
//! Each section is truncated to its configured limit, newest first; the
//! remainder is discarded for that render (no queuing or rotation). With
//! many articles per category this silently drops the oldest — pagination,
//! if desired, is layered by the caller invoking [`layout`] with different
//! candidate subsets.

use serde::{Deserialize, Serialize};

use gazette_core::{ArticleKind, ArticleRecord};

/// Per-kind display limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutLimits {
    /// Maximum primary articles.
    pub h1: usize,
    /// Maximum secondary articles.
    pub h2: usize,
    /// Maximum highlighted articles.
    pub highlight: usize,
    /// Maximum regular articles shown.
    pub regular: usize,
}

impl Default for LayoutLimits {
    fn default() -> Self {
        Self {
            h1: 1,
            h2: 2,
            highlight: 4,
            regular: 12,
        }
    }
}

/// The sectioned presentation structure.
///
/// Every section is always present — an empty section is an empty sequence,
/// never absent — so callers can render-or-skip uniformly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedLayout {
    /// Primary articles, newest first.
    pub h1: Vec<ArticleRecord>,
    /// Secondary articles, newest first.
    pub h2: Vec<ArticleRecord>,
    /// Highlighted articles, newest first.
    pub highlight: Vec<ArticleRecord>,
    /// Regular articles shown, newest first.
    pub regular: Vec<ArticleRecord>,
}

/// Lay out articles into sections.
///
/// Deterministic, pure function of its inputs:
///
/// 1. If `highlight_category` is set, promote every `regular` article whose
///    category matches it to `highlight` (idempotent; articles already
///    non-`regular` are untouched; an unset category never matches).
/// 2. Partition by kind.
/// 3. Sort each section by `created_at` descending; ties keep the input's
///    relative order (stable sort).
/// 4. Truncate each section to its limit.
pub fn layout(
    articles: Vec<ArticleRecord>,
    limits: &LayoutLimits,
    highlight_category: Option<&str>,
) -> FeedLayout {
    let mut result = FeedLayout::default();

    for mut article in articles {
        if article.kind == ArticleKind::Regular {
            if let (Some(wanted), Some(category)) = (highlight_category, &article.category) {
                if category == wanted {
                    article.kind = ArticleKind::Highlight;
                }
            }
        }
        match article.kind {
            ArticleKind::H1 => result.h1.push(article),
            ArticleKind::H2 => result.h2.push(article),
            ArticleKind::Highlight => result.highlight.push(article),
            ArticleKind::Regular => result.regular.push(article),
        }
    }

    for (section, limit) in [
        (&mut result.h1, limits.h1),
        (&mut result.h2, limits.h2),
        (&mut result.highlight, limits.highlight),
        (&mut result.regular, limits.regular),
    ] {
        section.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        section.truncate(limit);
    }

    result
}
