//! # devcon — local development agent
//!
//! Runs the devcon web workload in a local container and reports host
//! resource usage.

mod commands;
mod output;

use std::time::Duration;

use clap::Parser;
use devcon_runtime::Orchestrator;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::commands::{Cli, Context};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();
    let cancel = CancellationToken::new();
    install_interrupt_handler(&cancel)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        if let Some(timeout) = config.timeout {
            arm_deadline(&cancel, timeout);
        }
        let orchestrator = Orchestrator::connect(&config)?;
        let ctx = Context {
            orchestrator: &orchestrator,
            config: &config,
            cancel: &cancel,
        };
        commands::execute(cli.command, &ctx).await
    })
}

/// Logs go to stderr so stdout only carries command output.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,devcon_runtime=debug,devcon_cli=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn install_interrupt_handler(cancel: &CancellationToken) -> anyhow::Result<()> {
    let token = cancel.clone();
    ctrlc::set_handler(move || {
        tracing::warn!("interrupted, cancelling");
        token.cancel();
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {e}"))
}

fn arm_deadline(cancel: &CancellationToken, timeout: Duration) {
    let token = cancel.clone();
    let _deadline = tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        tracing::warn!(?timeout, "deadline reached, cancelling");
        token.cancel();
    });
}
