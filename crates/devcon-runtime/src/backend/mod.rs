//! Container engine abstraction.
//!
//! The services depend only on [`ContainerBackend`]; the Docker adapter in
//! [`docker`] is the production implementation and tests substitute
//! in-memory fakes.

pub mod docker;

use async_trait::async_trait;
use devcon_common::error::Result;
use devcon_common::types::{Container, ContainerCfg, ContainerId};
use tokio_util::sync::CancellationToken;

/// Capability set the core consumes from a container engine.
///
/// Implementors translate engine failures into the workspace error
/// taxonomy and do not interpret them further. Every call must give up
/// with [`Cancelled`](devcon_common::error::DevconError::Cancelled) once
/// `cancel` fires.
#[async_trait]
pub trait ContainerBackend: Send + Sync {
    /// Checks that the engine daemon answers.
    ///
    /// # Errors
    ///
    /// Returns `DaemonUnreachable` if the daemon does not respond.
    async fn ping(&self, cancel: &CancellationToken) -> Result<()>;

    /// Lists all containers, stopped ones included.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the engine cannot enumerate containers.
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Container>>;

    /// Creates a container from `cfg` without starting it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig`, `PortConflict`, or `Upstream`.
    async fn create(&self, cfg: &ContainerCfg, cancel: &CancellationToken) -> Result<ContainerId>;

    /// Starts a created or stopped container.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the container does not exist, otherwise `Upstream`.
    async fn start(&self, id: &ContainerId, cancel: &CancellationToken) -> Result<()>;

    /// Stops a running container.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the container does not exist, otherwise `Upstream`.
    async fn stop(&self, id: &ContainerId, cancel: &CancellationToken) -> Result<()>;

    /// Removes a container that is not running.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the container does not exist, otherwise `Upstream`.
    async fn remove(&self, id: &ContainerId, cancel: &CancellationToken) -> Result<()>;
}

/// Connects to the local container engine using host-default discovery.
///
/// # Errors
///
/// Returns `DaemonUnreachable` if no client can be configured.
pub fn connect_default() -> Result<Box<dyn ContainerBackend>> {
    Ok(Box::new(docker::DockerBackend::connect()?))
}
