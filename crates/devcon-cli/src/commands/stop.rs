//! `devcon stop` — Stop a running container.

use anyhow::Context as _;
use clap::Args;

use super::Context;

/// Arguments for the `stop` command.
#[derive(Args, Debug)]
pub struct StopArgs {
    /// ID of the container to stop.
    pub id: String,
}

/// Executes the `stop` command.
///
/// # Errors
///
/// Returns an error if the ID is empty or the engine cannot stop the
/// container.
pub async fn execute(args: StopArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    ctx.orchestrator
        .stop(&args.id, ctx.cancel)
        .await
        .with_context(|| format!("failed to stop container {}", args.id))?;
    println!("Stopped {}", args.id);
    Ok(())
}
