//! `devcon start` — Run the devcon web workload.

use clap::Args;
use devcon_common::constants::{BIN_NAME, DEFAULT_HOST_PORT};

use super::Context;

/// Arguments for the `start` command.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Host port to publish the web UI on.
    #[arg(short = 'p', long = "port", default_value = DEFAULT_HOST_PORT)]
    pub port: String,
}

/// Executes the `start` command.
///
/// Checks the daemon, then creates and starts the workload unless a
/// container for its image already exists. Nothing is printed until the
/// container is running.
///
/// # Errors
///
/// Returns an error if the daemon is unreachable, the port is invalid,
/// the workload is already present, or the engine fails. A container
/// that was created but not started is named in the error.
pub async fn execute(args: StartArgs, ctx: &Context<'_>) -> anyhow::Result<()> {
    let cfg = ctx.config.workload(args.port);

    let id = match ctx.orchestrator.start_devcon_web(&cfg, ctx.cancel).await {
        Ok(id) => id,
        Err(err) => {
            let hint = err.orphan().map(|orphan| {
                format!(
                    "container {} was left in the created state; run `{BIN_NAME} remove {}` to clean it up",
                    orphan.short(),
                    orphan
                )
            });
            let err = anyhow::Error::new(err).context("failed to start devcon");
            return Err(match hint {
                Some(hint) => err.context(hint),
                None => err,
            });
        }
    };

    println!("Devcon started (container: {})", id.short());
    println!("Open http://localhost:{}", cfg.host_port);
    Ok(())
}
