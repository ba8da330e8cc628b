//! `gazette fetch` — fetch a reference through the gateway chain.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use gazette_core::StorageRef;
use gazette_storage::GatewayFetcher;

use crate::Context;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Content reference (hex, optionally scheme-prefixed or with a path).
    pub reference: String,

    /// Declared content type, used to pick the access path and to guide
    /// extraction.
    #[arg(long)]
    pub content_type: Option<String>,

    /// Emit the fetched bytes as-is instead of extracting article content.
    #[arg(long)]
    pub raw: bool,

    /// Write output to a file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn run_fetch(args: &FetchArgs, ctx: &Context) -> anyhow::Result<u8> {
    let reference = StorageRef::parse_strict(&args.reference)?;
    let fetcher = GatewayFetcher::new(&ctx.gateway_config)?;

    let bytes = fetcher
        .fetch(&reference, args.content_type.as_deref())
        .await?;

    let out: Vec<u8> = if args.raw {
        bytes.as_ref().clone()
    } else {
        let content = gazette_content::extract(&bytes, args.content_type.as_deref())?;
        let mut json = serde_json::to_vec_pretty(&content)?;
        json.push(b'\n');
        json
    };

    match &args.output {
        Some(path) => std::fs::write(path, &out)?,
        None => std::io::stdout().write_all(&out)?,
    }
    Ok(0)
}
