//! Agent configuration model.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::types::ContainerCfg;

/// Root configuration for the devcon agent.
///
/// There is no configuration file; the CLI starts from [`Default`] and
/// overrides fields from flags and environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevconConfig {
    /// Image tag of the managed web workload.
    pub image: String,
    /// Container name of the managed web workload.
    pub container_name: String,
    /// Port the workload listens on inside its container.
    pub container_port: String,
    /// Mount point reported in system snapshots.
    pub disk_mount: PathBuf,
    /// CPU busy-percent sampling window.
    pub cpu_sample_window: Duration,
    /// Deadline for a single command, if any.
    pub timeout: Option<Duration>,
}

impl DevconConfig {
    /// Builds the creation request for the web workload on `host_port`.
    #[must_use]
    pub fn workload(&self, host_port: impl Into<String>) -> ContainerCfg {
        ContainerCfg {
            image: self.image.clone(),
            name: self.container_name.clone(),
            container_port: self.container_port.clone(),
            host_port: host_port.into(),
        }
    }
}

impl Default for DevconConfig {
    fn default() -> Self {
        Self {
            image: constants::DEVCON_IMAGE.to_string(),
            container_name: constants::DEVCON_CONTAINER_NAME.to_string(),
            container_port: constants::DEVCON_CONTAINER_PORT.to_string(),
            disk_mount: PathBuf::from(constants::DEFAULT_DISK_MOUNT),
            cpu_sample_window: constants::CPU_SAMPLE_WINDOW,
            timeout: None,
        }
    }
}
