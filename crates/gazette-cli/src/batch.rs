//! `gazette batch` — postage batch inspection and resolution.

use clap::{Args, Subcommand};

use crate::Context;

#[derive(Args, Debug)]
pub struct BatchArgs {
    #[command(subcommand)]
    pub command: BatchCommand,
}

#[derive(Subcommand, Debug)]
pub enum BatchCommand {
    /// List the node's postage batches.
    List,

    /// Resolve the batch id the next write would use.
    Resolve {
        /// Explicit batch id to validate instead of discovering one.
        #[arg(long)]
        batch_id: Option<String>,
    },

    /// Forget the persisted default batch id.
    Forget,
}

pub async fn run_batch(args: &BatchArgs, ctx: &Context) -> anyhow::Result<u8> {
    let node = ctx.node()?;
    let resolver = ctx.resolver(node.clone());

    match &args.command {
        BatchCommand::List => {
            let batches = node.list_batches().await?;
            if batches.is_empty() {
                println!("no postage batches");
                return Ok(0);
            }
            for batch in &batches {
                println!(
                    "{}  usable={}  remaining={}",
                    batch.batch_id, batch.usable, batch.remaining_capacity
                );
            }
            Ok(0)
        }
        BatchCommand::Resolve { batch_id } => {
            let id = resolver.resolve(batch_id.as_deref()).await?;
            println!("{id}");
            Ok(0)
        }
        BatchCommand::Forget => {
            match resolver.last_known() {
                Some(id) => {
                    resolver.forget_last_known();
                    println!("forgot {id}");
                }
                None => println!("no persisted batch id"),
            }
            Ok(0)
        }
    }
}
