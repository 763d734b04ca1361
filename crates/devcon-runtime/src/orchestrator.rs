//! Use-case façade consumed by the command surface.
//!
//! Validates caller input, delegates to [`ContainerService`] and
//! [`MetricsAggregator`], and turns a half-provisioned workload into a
//! plain error the CLI can print.

use devcon_common::config::DevconConfig;
use devcon_common::error::{DevconError, Result};
use devcon_common::stats::SystemStats;
use devcon_common::types::{Container, ContainerCfg, ContainerId};
use tokio_util::sync::CancellationToken;

use crate::backend::{self, ContainerBackend};
use crate::metrics::host::HostProbe;
use crate::metrics::{MetricsAggregator, MetricsProbe};
use crate::service::ContainerService;

/// Entry point for every agent operation.
///
/// Built explicitly and handed to the command layer; there is no global
/// instance.
pub struct Orchestrator {
    containers: ContainerService,
    metrics: MetricsAggregator,
}

impl Orchestrator {
    /// Creates an orchestrator over explicit engine and metrics ports.
    #[must_use]
    pub fn new(
        backend: Box<dyn ContainerBackend>,
        probe: Box<dyn MetricsProbe>,
        config: &DevconConfig,
    ) -> Self {
        Self {
            containers: ContainerService::new(backend),
            metrics: MetricsAggregator::from_config(probe, config),
        }
    }

    /// Creates an orchestrator for the local Docker daemon and host.
    ///
    /// # Errors
    ///
    /// Returns `DaemonUnreachable` if the engine client cannot be
    /// configured. The daemon itself is not contacted.
    pub fn connect(config: &DevconConfig) -> Result<Self> {
        Ok(Self::new(
            backend::connect_default()?,
            Box::new(HostProbe::new()),
            config,
        ))
    }

    /// Checks that the engine daemon answers.
    ///
    /// # Errors
    ///
    /// Returns `DaemonUnreachable` or `Cancelled`.
    pub async fn ping(&self, cancel: &CancellationToken) -> Result<()> {
        self.containers.ping(cancel).await
    }

    /// Lists all containers.
    ///
    /// # Errors
    ///
    /// Propagates the engine error.
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Container>> {
        self.containers.list_containers(cancel).await
    }

    /// Starts the container with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty ID, otherwise the engine error.
    pub async fn start(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        require_id(id)?;
        self.containers.start_container(id, cancel).await
    }

    /// Stops the container with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty ID, otherwise the engine error.
    pub async fn stop(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        require_id(id)?;
        self.containers.stop_container(id, cancel).await
    }

    /// Removes a container, typically one left behind by a failed start.
    ///
    /// Never invoked implicitly by [`Orchestrator::start_devcon_web`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty ID, otherwise the engine error.
    pub async fn cleanup(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        require_id(id)?;
        self.containers.remove_container(id, cancel).await
    }

    /// Ensures the web workload described by `cfg` is running.
    ///
    /// Daemon liveness is checked first so that an unreachable engine is
    /// never reported as a configuration problem, then the workload is
    /// created and started unless its image is already present.
    ///
    /// # Errors
    ///
    /// Returns `DaemonUnreachable`, `InvalidConfig`, `Conflict`, the
    /// engine error of the listing or create, or [`DevconError::Orphaned`]
    /// when the container was created but could not be started.
    pub async fn start_devcon_web(
        &self,
        cfg: &ContainerCfg,
        cancel: &CancellationToken,
    ) -> Result<ContainerId> {
        self.containers.ping(cancel).await?;
        let outcome = self.containers.ensure_running(cfg, cancel).await?;
        let id = outcome.into_result()?;
        tracing::info!(id = %id, image = %cfg.image, host_port = %cfg.host_port, "workload running");
        Ok(id)
    }

    /// Takes a host resource snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first failing probe call; no partial snapshot is
    /// returned.
    pub async fn system_stats(&self, cancel: &CancellationToken) -> Result<SystemStats> {
        self.metrics.snapshot(cancel).await
    }
}

fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(DevconError::invalid("a container id is required"));
    }
    Ok(())
}
