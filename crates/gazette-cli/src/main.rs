//! # gazette CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Global flags select the node endpoint, the gateway chain, and the local
//! state file; subcommands cover the publish and retrieval paths.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gazette_cli::batch::{run_batch, BatchArgs};
use gazette_cli::feed::{run_feed, FeedArgs};
use gazette_cli::fetch::{run_fetch, FetchArgs};
use gazette_cli::keygen::{run_keygen, KeygenArgs};
use gazette_cli::publish::{run_publish, PublishArgs};
use gazette_cli::Context;

/// Gazette — decentralized article publishing
///
/// Publishes article documents to a content-addressed storage network and
/// retrieves them through an ordered gateway chain.
#[derive(Parser, Debug)]
#[command(name = "gazette", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Node API endpoint for the write path.
    #[arg(long, global = true)]
    node_url: Option<String>,

    /// Gateway endpoint for the read path; repeat to build an ordered
    /// fallback chain.
    #[arg(long = "gateway", global = true)]
    gateways: Vec<String>,

    /// Local state file (default: ~/.gazette/state.json).
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// Dev mode: fall back to the placeholder batch id when no usable
    /// postage batch exists.
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Postage batch inspection and resolution.
    Batch(BatchArgs),

    /// Generate an Ed25519 signing key for a website pointer.
    Keygen(KeygenArgs),

    /// Build the article document and upload it.
    Publish(PublishArgs),

    /// Fetch a reference through the gateway chain.
    Fetch(FetchArgs),

    /// Preview the feed layout for a local article index.
    Feed(FeedArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let ctx = Context::new(cli.node_url, cli.gateways, cli.state_file, cli.dev);

    let result = match cli.command {
        Commands::Keygen(args) => run_keygen(&args),
        Commands::Feed(args) => run_feed(&args),
        Commands::Batch(args) => block_on(run_batch(&args, &ctx)),
        Commands::Publish(args) => block_on(run_publish(&args, &ctx)),
        Commands::Fetch(args) => block_on(run_fetch(&args, &ctx)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Run an async subcommand on a fresh runtime. Only the networked
/// subcommands pay the runtime startup cost.
fn block_on<F: std::future::Future<Output = anyhow::Result<u8>>>(fut: F) -> anyhow::Result<u8> {
    tokio::runtime::Runtime::new()
        .map_err(|e| anyhow::anyhow!("failed to start async runtime: {e}"))?
        .block_on(fut)
}
