//! Domain primitive types used across the devcon workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::SHORT_ID_LEN;
use crate::error::{DevconError, Result};

/// Engine-assigned identifier of a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns at most the first 12 characters of the ID.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(SHORT_ID_LEN)
            .map_or(self.0.as_str(), |(end, _)| &self.0[..end])
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observed snapshot of a container as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Identity of the container.
    pub id: ContainerId,
    /// Image tag the container was created from. Not unique.
    pub image: String,
    /// Free-form engine status string.
    pub status: String,
}

impl Container {
    /// Returns whether `identifier` equals this container's ID or image.
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn matches(&self, identifier: &str) -> bool {
        self.id.as_str() == identifier || self.image == identifier
    }
}

/// Request to create a container with a single published TCP port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerCfg {
    /// Image tag to create the container from.
    pub image: String,
    /// Container name; empty lets the engine choose one.
    pub name: String,
    /// TCP port exposed inside the container.
    pub container_port: String,
    /// Host TCP port the container port is published on.
    pub host_port: String,
}

impl ContainerCfg {
    /// Checks the request before it reaches the engine.
    ///
    /// # Errors
    ///
    /// Returns [`DevconError::InvalidConfig`] if the image is empty, the
    /// name contains characters the engine rejects, or either port is not
    /// a TCP port number in `1..=65535`.
    pub fn validate(&self) -> Result<()> {
        if self.image.trim().is_empty() {
            return Err(DevconError::invalid("image must not be empty"));
        }
        if !self.name.is_empty() && !is_valid_name(&self.name) {
            return Err(DevconError::invalid(format!(
                "invalid container name: {:?}",
                self.name
            )));
        }
        let _ = parse_port("container port", &self.container_port)?;
        let _ = parse_port("host port", &self.host_port)?;
        Ok(())
    }

    /// Returns the container port as a number.
    ///
    /// # Errors
    ///
    /// Returns [`DevconError::InvalidConfig`] if the port is malformed.
    pub fn container_port_number(&self) -> Result<u16> {
        parse_port("container port", &self.container_port)
    }

    /// Returns the host port as a number.
    ///
    /// # Errors
    ///
    /// Returns [`DevconError::InvalidConfig`] if the port is malformed.
    pub fn host_port_number(&self) -> Result<u16> {
        parse_port("host port", &self.host_port)
    }
}

/// Parses a TCP port number, rejecting zero.
///
/// # Errors
///
/// Returns [`DevconError::InvalidConfig`] naming `label` when `value` is
/// not an integer in `1..=65535`.
pub fn parse_port(label: &str, value: &str) -> Result<u16> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(DevconError::invalid(format!(
            "{label} must be a TCP port number between 1 and 65535, got {value:?}"
        ))),
    }
}

// Docker accepts `[a-zA-Z0-9][a-zA-Z0-9_.-]*`.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Lifecycle state of a managed workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkloadState {
    /// No container exists for the workload.
    Absent,
    /// Container has been created but not yet started.
    Created,
    /// Container is actively running.
    Running,
    /// Container has been stopped.
    Stopped,
}

impl WorkloadState {
    /// Returns whether the engine may move a workload from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Absent, Self::Created)
                | (Self::Created, Self::Running)
                | (Self::Running, Self::Stopped)
                | (Self::Stopped, Self::Running)
                | (Self::Created | Self::Stopped, Self::Absent)
        )
    }
}

impl fmt::Display for WorkloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}
