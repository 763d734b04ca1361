//! `devcon stats` — Show a host resource snapshot.

use anyhow::Context as _;
use clap::Args;

use super::Context;
use crate::output;

/// Arguments for the `stats` command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print the snapshot as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `stats` command.
///
/// Blocks for the CPU sampling window before printing.
///
/// # Errors
///
/// Returns an error if any probe fails or the snapshot cannot be
/// serialized.
pub async fn execute(args: StatsArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let stats = ctx
        .orchestrator
        .system_stats(ctx.cancel)
        .await
        .context("failed to collect system stats")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", output::stats_report(&stats));
    }
    Ok(())
}
