//! `devcon remove` — Remove a container that is not running.

use anyhow::Context as _;
use clap::Args;

use super::Context;

/// Arguments for the `remove` command.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// ID of the container to remove.
    pub id: String,
}

/// Executes the `remove` command.
///
/// This is how a container left in the created state by a failed
/// `start` gets cleaned up.
///
/// # Errors
///
/// Returns an error if the ID is empty or the engine refuses the removal.
pub async fn execute(args: RemoveArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    ctx.orchestrator
        .cleanup(&args.id, ctx.cancel)
        .await
        .with_context(|| format!("failed to remove container {}", args.id))?;
    println!("Removed {}", args.id);
    Ok(())
}
