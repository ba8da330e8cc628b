//! `gazette feed` — preview the feed layout for a local article index.
//!
//! Reads a JSON array of article records and prints the sectioned layout
//! the presentation layer would render.

use std::path::PathBuf;

use clap::Args;

use gazette_core::ArticleRecord;
use gazette_feed::{layout, LayoutLimits};

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// JSON file holding an array of article records.
    pub index: PathBuf,

    /// Maximum primary articles.
    #[arg(long)]
    pub h1: Option<usize>,

    /// Maximum secondary articles.
    #[arg(long)]
    pub h2: Option<usize>,

    /// Maximum highlighted articles.
    #[arg(long)]
    pub highlight: Option<usize>,

    /// Maximum regular articles.
    #[arg(long)]
    pub regular: Option<usize>,

    /// Category whose regular articles are promoted to highlights.
    #[arg(long)]
    pub highlight_category: Option<String>,
}

pub fn run_feed(args: &FeedArgs) -> anyhow::Result<u8> {
    let bytes = std::fs::read(&args.index).map_err(|e| {
        anyhow::anyhow!("failed to read article index {}: {e}", args.index.display())
    })?;
    let articles: Vec<ArticleRecord> = serde_json::from_slice(&bytes).map_err(|e| {
        anyhow::anyhow!("article index {} is not valid JSON: {e}", args.index.display())
    })?;

    let defaults = LayoutLimits::default();
    let limits = LayoutLimits {
        h1: args.h1.unwrap_or(defaults.h1),
        h2: args.h2.unwrap_or(defaults.h2),
        highlight: args.highlight.unwrap_or(defaults.highlight),
        regular: args.regular.unwrap_or(defaults.regular),
    };

    let feed = layout(articles, &limits, args.highlight_category.as_deref());
    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn feed_reads_index_and_lays_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");

        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let articles = vec![ArticleRecord::new("one", "body", "0xabc", at)];
        std::fs::write(&path, serde_json::to_vec(&articles).unwrap()).unwrap();

        let args = FeedArgs {
            index: path,
            h1: None,
            h2: None,
            highlight: None,
            regular: Some(1),
            highlight_category: None,
        };
        assert_eq!(run_feed(&args).unwrap(), 0);
    }

    #[test]
    fn feed_rejects_invalid_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "not json").unwrap();

        let args = FeedArgs {
            index: path,
            h1: None,
            h2: None,
            highlight: None,
            regular: None,
            highlight_category: None,
        };
        assert!(run_feed(&args).is_err());
    }
}
