//! Docker Engine backend over the `bollard` client.

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::Docker;
use bollard::container::{
    Config, CreateContainerOptions, ListContainersOptions, RemoveContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use bollard::errors::Error as BollardError;
use bollard::models::{ContainerSummary, HostConfig, PortBinding};
use devcon_common::constants::HOST_BIND_ADDR;
use devcon_common::error::{DevconError, Result};
use devcon_common::types::{Container, ContainerCfg, ContainerId};
use tokio_util::sync::CancellationToken;

use super::ContainerBackend;
use crate::cancel::guarded;

/// Backend that drives a Docker-compatible daemon over its HTTP API.
///
/// The daemon is located through `DOCKER_HOST` or the platform's default
/// local socket.
pub struct DockerBackend {
    docker: Docker,
}

impl DockerBackend {
    /// Configures a client for the local daemon.
    ///
    /// No request is sent; call [`ContainerBackend::ping`] to check
    /// liveness.
    ///
    /// # Errors
    ///
    /// Returns `DaemonUnreachable` if the connection settings are unusable.
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults().map_err(|e| {
            DevconError::DaemonUnreachable {
                message: e.to_string(),
            }
        })?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerBackend for DockerBackend {
    async fn ping(&self, cancel: &CancellationToken) -> Result<()> {
        guarded(cancel, "ping daemon", async {
            let _ = self.docker.ping().await.map_err(|e| {
                DevconError::DaemonUnreachable {
                    message: e.to_string(),
                }
            })?;
            tracing::debug!("docker daemon answered ping");
            Ok(())
        })
        .await
    }

    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Container>> {
        guarded(cancel, "list containers", async {
            let options = ListContainersOptions::<String> {
                all: true,
                ..Default::default()
            };
            let summaries = self
                .docker
                .list_containers(Some(options))
                .await
                .map_err(|e| translate("list containers", &Subject::Daemon, e))?;
            tracing::debug!(count = summaries.len(), "listed containers");
            Ok(summaries.into_iter().filter_map(into_container).collect())
        })
        .await
    }

    async fn create(&self, cfg: &ContainerCfg, cancel: &CancellationToken) -> Result<ContainerId> {
        let config = container_config(cfg)?;
        let options = (!cfg.name.is_empty()).then(|| CreateContainerOptions {
            name: cfg.name.clone(),
            ..Default::default()
        });
        guarded(cancel, "create container", async {
            let response = self
                .docker
                .create_container(options, config)
                .await
                .map_err(|e| translate("create container", &Subject::Request(cfg), e))?;
            for warning in &response.warnings {
                tracing::warn!(image = %cfg.image, %warning, "engine warning on create");
            }
            let id = ContainerId::new(response.id);
            tracing::info!(id = %id, image = %cfg.image, name = %cfg.name, "container created");
            Ok(id)
        })
        .await
    }

    async fn start(&self, id: &ContainerId, cancel: &CancellationToken) -> Result<()> {
        guarded(cancel, "start container", async {
            self.docker
                .start_container(id.as_str(), None::<StartContainerOptions<String>>)
                .await
                .map_err(|e| translate("start container", &Subject::Container(id), e))?;
            tracing::info!(id = %id, "container started");
            Ok(())
        })
        .await
    }

    async fn stop(&self, id: &ContainerId, cancel: &CancellationToken) -> Result<()> {
        guarded(cancel, "stop container", async {
            self.docker
                .stop_container(id.as_str(), None::<StopContainerOptions>)
                .await
                .map_err(|e| translate("stop container", &Subject::Container(id), e))?;
            tracing::info!(id = %id, "container stopped");
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: &ContainerId, cancel: &CancellationToken) -> Result<()> {
        guarded(cancel, "remove container", async {
            self.docker
                .remove_container(id.as_str(), None::<RemoveContainerOptions>)
                .await
                .map_err(|e| translate("remove container", &Subject::Container(id), e))?;
            tracing::info!(id = %id, "container removed");
            Ok(())
        })
        .await
    }
}

/// What an engine call was about, used to classify its failures.
enum Subject<'a> {
    Daemon,
    Container(&'a ContainerId),
    Request(&'a ContainerCfg),
}

/// Builds the engine-side create request: one exposed TCP port bound on
/// all host interfaces.
fn container_config(cfg: &ContainerCfg) -> Result<Config<String>> {
    cfg.validate()?;
    let port_key = format!("{}/tcp", cfg.container_port_number()?);
    let binding = PortBinding {
        host_ip: Some(HOST_BIND_ADDR.to_string()),
        host_port: Some(cfg.host_port_number()?.to_string()),
    };

    Ok(Config {
        image: Some(cfg.image.clone()),
        exposed_ports: Some(HashMap::from([(port_key.clone(), HashMap::new())])),
        host_config: Some(HostConfig {
            port_bindings: Some(HashMap::from([(port_key, Some(vec![binding]))])),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn into_container(summary: ContainerSummary) -> Option<Container> {
    Some(Container {
        id: ContainerId::new(summary.id?),
        image: summary.image.unwrap_or_default(),
        status: summary.status.unwrap_or_default(),
    })
}

/// Maps a `bollard` error onto the workspace taxonomy.
fn translate(operation: &'static str, subject: &Subject<'_>, err: BollardError) -> DevconError {
    let (status_code, message) = match err {
        BollardError::DockerResponseServerError {
            status_code,
            message,
        } => (status_code, message),
        other => return DevconError::upstream(operation, other),
    };

    if is_port_in_use(&message) {
        let port = match subject {
            Subject::Request(cfg) => cfg.host_port.clone(),
            _ => port_from_message(&message).unwrap_or_else(|| "unknown".to_string()),
        };
        return DevconError::PortConflict { port };
    }

    match (status_code, subject) {
        (404, Subject::Container(id)) => DevconError::NotFound {
            kind: "container",
            id: id.to_string(),
        },
        (404, Subject::Request(cfg)) => DevconError::NotFound {
            kind: "image",
            id: cfg.image.clone(),
        },
        (400, _) => DevconError::InvalidConfig { message },
        (409, _) => DevconError::Conflict { message },
        _ => DevconError::upstream(
            operation,
            BollardError::DockerResponseServerError {
                status_code,
                message,
            },
        ),
    }
}

fn is_port_in_use(message: &str) -> bool {
    message.contains("port is already allocated") || message.contains("address already in use")
}

/// Extracts `3000` from messages like `Bind for 0.0.0.0:3000 failed: ...`.
fn port_from_message(message: &str) -> Option<String> {
    let addr = message.split("Bind for ").nth(1)?.split_whitespace().next()?;
    let port = addr.rsplit(':').next()?;
    (!port.is_empty() && port.chars().all(|c| c.is_ascii_digit())).then(|| port.to_string())
}
