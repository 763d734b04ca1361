//! Container business logic over the engine port.
//!
//! The service owns no state between calls: every check re-lists the
//! engine so decisions are taken against a fresh snapshot.

use devcon_common::error::{DevconError, Result};
use devcon_common::types::{Container, ContainerCfg, ContainerId, WorkloadState};
use tokio_util::sync::CancellationToken;

use crate::backend::ContainerBackend;
use crate::cancel::check;

/// Result of provisioning a workload.
///
/// Creating and starting are two separate engine calls with no
/// transaction around them, so a failed start leaves the created
/// container behind. The engine is not cleaned up automatically.
#[derive(Debug)]
pub enum ProvisionOutcome {
    /// The container was created and started.
    Running(ContainerId),
    /// The container was created but starting it failed or was cancelled.
    CreatedNotStarted {
        /// Identifier of the created container.
        id: ContainerId,
        /// Error that prevented the start.
        cause: DevconError,
    },
}

impl ProvisionOutcome {
    /// Returns the ID of the container that now exists in the engine.
    #[must_use]
    pub const fn id(&self) -> &ContainerId {
        match self {
            Self::Running(id) | Self::CreatedNotStarted { id, .. } => id,
        }
    }

    /// Returns the lifecycle state the workload was left in.
    #[must_use]
    pub const fn state(&self) -> WorkloadState {
        match self {
            Self::Running(_) => WorkloadState::Running,
            Self::CreatedNotStarted { .. } => WorkloadState::Created,
        }
    }

    /// Converts the outcome into the ID of a running container.
    ///
    /// # Errors
    ///
    /// Returns [`DevconError::Orphaned`] carrying the created container's
    /// ID and the start failure.
    pub fn into_result(self) -> Result<ContainerId> {
        match self {
            Self::Running(id) => Ok(id),
            Self::CreatedNotStarted { id, cause } => Err(DevconError::Orphaned {
                id,
                source: Box::new(cause),
            }),
        }
    }
}

/// Idempotence checks and the create-then-start workflow.
pub struct ContainerService {
    backend: Box<dyn ContainerBackend>,
}

impl ContainerService {
    /// Creates a service over the given engine backend.
    #[must_use]
    pub fn new(backend: Box<dyn ContainerBackend>) -> Self {
        Self { backend }
    }

    /// Checks that the engine daemon answers.
    ///
    /// # Errors
    ///
    /// Returns `DaemonUnreachable` or `Cancelled`.
    pub async fn ping(&self, cancel: &CancellationToken) -> Result<()> {
        self.backend.ping(cancel).await
    }

    /// Lists every container the engine knows about, unfiltered.
    ///
    /// # Errors
    ///
    /// Propagates the engine error.
    pub async fn list_containers(&self, cancel: &CancellationToken) -> Result<Vec<Container>> {
        self.backend.list(cancel).await
    }

    /// Creates a container without starting it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` before touching the engine if `cfg` is
    /// malformed, otherwise propagates the engine error.
    pub async fn create_container(
        &self,
        cfg: &ContainerCfg,
        cancel: &CancellationToken,
    ) -> Result<ContainerId> {
        cfg.validate()?;
        self.backend.create(cfg, cancel).await
    }

    /// Starts the container with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` without touching the engine if `id` is
    /// empty, otherwise propagates the engine error.
    pub async fn start_container(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let id = require_id(id)?;
        self.backend.start(&id, cancel).await
    }

    /// Stops the container with the given ID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` without touching the engine if `id` is
    /// empty, otherwise propagates the engine error.
    pub async fn stop_container(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let id = require_id(id)?;
        self.backend.stop(&id, cancel).await
    }

    /// Removes the container with the given ID.
    ///
    /// This is the compensating action for a workload left in the
    /// created state; nothing in the service calls it on its own.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` without touching the engine if `id` is
    /// empty, otherwise propagates the engine error.
    pub async fn remove_container(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let id = require_id(id)?;
        self.backend.remove(&id, cancel).await
    }

    /// Returns whether any listed container has ID or image `identifier`.
    ///
    /// Linear scan over a fresh listing; matching is exact.
    ///
    /// # Errors
    ///
    /// Propagates the engine error from listing.
    pub async fn is_running(&self, identifier: &str, cancel: &CancellationToken) -> Result<bool> {
        let containers = self.backend.list(cancel).await?;
        Ok(containers.iter().any(|c| c.matches(identifier)))
    }

    /// Creates and starts the workload described by `cfg` unless a
    /// container for its image already exists.
    ///
    /// A start failure after a successful create is reported as
    /// [`ProvisionOutcome::CreatedNotStarted`], not as an error, so the
    /// caller always learns the ID of the container left behind. The
    /// start is skipped if `cancel` fired after the create.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a malformed `cfg`, `Conflict` if the
    /// image is already present, or the error of the listing or create.
    pub async fn ensure_running(
        &self,
        cfg: &ContainerCfg,
        cancel: &CancellationToken,
    ) -> Result<ProvisionOutcome> {
        cfg.validate()?;

        if self.is_running(&cfg.image, cancel).await? {
            tracing::info!(image = %cfg.image, "workload already present, not creating");
            return Err(DevconError::Conflict {
                message: format!("a container for {} is already running", cfg.image),
            });
        }

        let id = self.backend.create(cfg, cancel).await?;

        let started = match check(cancel, "start container") {
            Ok(()) => self.backend.start(&id, cancel).await,
            Err(cancelled) => Err(cancelled),
        };

        match started {
            Ok(()) => Ok(ProvisionOutcome::Running(id)),
            Err(cause) => {
                tracing::warn!(
                    id = %id,
                    image = %cfg.image,
                    error = %cause,
                    "container created but not started; left in engine"
                );
                Ok(ProvisionOutcome::CreatedNotStarted { id, cause })
            }
        }
    }
}

fn require_id(id: &str) -> Result<ContainerId> {
    if id.trim().is_empty() {
        return Err(DevconError::invalid("container id must not be empty"));
    }
    Ok(ContainerId::new(id))
}
