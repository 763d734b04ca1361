//! `devcon ping` — Check that the Docker daemon answers.

use anyhow::Context as _;

use super::Context;

/// Executes the `ping` command.
///
/// # Errors
///
/// Returns an error if the daemon is unreachable.
pub async fn execute(ctx: &Context<'_>) -> anyhow::Result<()> {
    ctx.orchestrator
        .ping(ctx.cancel)
        .await
        .context("docker daemon check failed")?;
    println!("Docker daemon is reachable.");
    Ok(())
}
