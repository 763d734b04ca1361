//! `devcon list` — List containers known to the engine.

use anyhow::Context as _;
use clap::Args;

use super::Context;
use crate::output;

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {}

/// Executes the `list` command.
///
/// Prints one row per container, stopped ones included, with its ID,
/// image, and engine status.
///
/// # Errors
///
/// Returns an error if the engine cannot list containers.
pub async fn execute(_args: ListArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let containers = ctx
        .orchestrator
        .list(ctx.cancel)
        .await
        .context("failed to list containers")?;

    if containers.is_empty() {
        println!("No containers found.");
        return Ok(());
    }

    print!("{}", output::container_table(&containers));
    Ok(())
}
