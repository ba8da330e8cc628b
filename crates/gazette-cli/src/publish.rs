//! `gazette publish` — build the article document and upload it.
//!
//! Reads a markdown source file, wraps it in the dual-purpose document
//! envelope, and uploads it as a one-entry collection. With `--key` the
//! signed website pointer is updated to the new manifest, so the stable
//! address keeps resolving to the latest publish.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use gazette_content::ArticleContent;
use gazette_core::StorageRef;
use gazette_storage::{Collection, STANDARD_DOCUMENT_NAME};

use crate::{load_signing_key, Context};

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Markdown source file for the article body.
    pub file: PathBuf,

    /// Article title.
    #[arg(long)]
    pub title: String,

    /// Author's chain address.
    #[arg(long)]
    pub author: String,

    /// Editorial category.
    #[arg(long)]
    pub category: Option<String>,

    /// Tag; repeat for multiple tags.
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Banner image reference.
    #[arg(long)]
    pub banner: Option<String>,

    /// Explicit postage batch id; discovered when omitted.
    #[arg(long)]
    pub batch_id: Option<String>,

    /// Signing key file; when given, the website pointer is updated to the
    /// new manifest after upload.
    #[arg(long)]
    pub key: Option<PathBuf>,
}

pub async fn run_publish(args: &PublishArgs, ctx: &Context) -> anyhow::Result<u8> {
    let body = std::fs::read_to_string(&args.file).map_err(|e| {
        anyhow::anyhow!("failed to read article source {}: {e}", args.file.display())
    })?;
    if body.trim().is_empty() {
        anyhow::bail!("article source {} is empty", args.file.display());
    }

    let mut content = ArticleContent::new(&args.title, body, &args.author, Utc::now());
    content.category = args.category.clone();
    content.tags = args.tags.clone();
    if let Some(banner) = &args.banner {
        content.banner = Some(StorageRef::parse_strict(banner)?);
    }
    let document = content.to_document()?;

    let node = ctx.node()?;
    let resolver = ctx.resolver(node.clone());
    let batch = resolver.resolve(args.batch_id.as_deref()).await?;

    let mut collection = Collection::new();
    collection.add(STANDARD_DOCUMENT_NAME, document.into_bytes(), "text/html");
    let reference = node.upload_manifest(&batch, collection.entries()).await?;
    println!("reference: {reference}");

    if let Some(key_path) = &args.key {
        let key = load_signing_key(key_path)?;
        let address = node.publish_pointer(&key, &reference).await?;
        println!("address:   {address}");
    }

    Ok(0)
}
