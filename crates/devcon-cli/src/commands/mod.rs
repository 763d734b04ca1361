//! CLI command definitions and dispatch.

pub mod list;
pub mod ping;
pub mod remove;
pub mod start;
pub mod stats;
pub mod stop;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use devcon_common::config::DevconConfig;
use devcon_common::constants::{BIN_NAME, DEFAULT_DISK_MOUNT};
use devcon_runtime::Orchestrator;
use tokio_util::sync::CancellationToken;

/// devcon — local/cloud dev control panel for Docker.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Cancel the command after this many seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Mount point whose disk usage `stats` reports.
    #[arg(long, global = true, default_value = DEFAULT_DISK_MOUNT)]
    pub disk_mount: PathBuf,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the agent configuration from defaults and global flags.
    #[must_use]
    pub fn config(&self) -> DevconConfig {
        DevconConfig {
            disk_mount: self.disk_mount.clone(),
            timeout: self.timeout.map(Duration::from_secs),
            ..DevconConfig::default()
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List containers.
    List(list::ListArgs),
    /// Start the devcon web workload.
    Start(start::StartArgs),
    /// Stop a container.
    Stop(stop::StopArgs),
    /// Remove a container, e.g. one left behind by a failed start.
    Remove(remove::RemoveArgs),
    /// Show a snapshot of host CPU, memory, disk, and OS details.
    Stats(stats::StatsArgs),
    /// Check that the Docker daemon is reachable.
    Ping,
}

/// Dependencies handed to every command.
pub struct Context<'a> {
    /// Use-case façade over the engine and the metrics probe.
    pub orchestrator: &'a Orchestrator,
    /// Effective agent configuration.
    pub config: &'a DevconConfig,
    /// Fired on Ctrl+C or when the deadline passes.
    pub cancel: &'a CancellationToken,
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub async fn execute(command: Command, ctx: &Context<'_>) -> anyhow::Result<()> {
    match command {
        Command::List(args) => list::execute(args, ctx).await,
        Command::Start(args) => start::execute(args, ctx).await,
        Command::Stop(args) => stop::execute(args, ctx).await,
        Command::Remove(args) => remove::execute(args, ctx).await,
        Command::Stats(args) => stats::execute(args, ctx).await,
        Command::Ping => ping::execute(ctx).await,
    }
}
