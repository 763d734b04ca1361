//! Unified error types for the devcon workspace.
//!
//! Port adapters translate transport-level failures into these variants;
//! services and the orchestrator only compose them. Nothing here is
//! retried automatically.

use thiserror::Error;

use crate::types::ContainerId;

/// Boxed cause carried by [`DevconError::Upstream`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DevconError {
    /// The container engine did not answer the liveness check.
    #[error("container daemon unreachable: {message}")]
    DaemonUnreachable {
        /// Description of the connection failure.
        message: String,
    },

    /// A caller-supplied value is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the invalid value.
        message: String,
    },

    /// The workload is already present in the engine.
    #[error("conflict: {message}")]
    Conflict {
        /// Description of the conflicting resource.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// The requested host port is already bound.
    #[error("host port {port} is already in use")]
    PortConflict {
        /// Host port that could not be bound.
        port: String,
    },

    /// The engine failed for a reason the adapter does not classify.
    #[error("{operation} failed: {source}")]
    Upstream {
        /// Engine operation that failed.
        operation: &'static str,
        /// Original engine error.
        #[source]
        source: BoxError,
    },

    /// The cancellation signal fired before the operation completed.
    #[error("{operation} cancelled")]
    Cancelled {
        /// Operation that observed the cancellation.
        operation: &'static str,
    },

    /// A host metrics probe failed or returned an inconsistent reading.
    #[error("{component} probe failed: {message}")]
    Probe {
        /// Metric source that failed (`cpu`, `memory`, `disk`, `host`).
        component: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// A container was created but could not be started.
    ///
    /// The container is left in the engine; remove it explicitly.
    #[error("container {id} was created but not started: {source}")]
    Orphaned {
        /// Identifier of the created container.
        id: ContainerId,
        /// Error that interrupted the start.
        #[source]
        source: Box<DevconError>,
    },
}

/// Fieldless classification of a [`DevconError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`DevconError::DaemonUnreachable`].
    DaemonUnreachable,
    /// See [`DevconError::InvalidConfig`].
    InvalidConfig,
    /// See [`DevconError::Conflict`].
    Conflict,
    /// See [`DevconError::NotFound`].
    NotFound,
    /// See [`DevconError::PortConflict`].
    PortConflict,
    /// See [`DevconError::Upstream`].
    UpstreamFailure,
    /// See [`DevconError::Cancelled`].
    Cancelled,
    /// See [`DevconError::Probe`].
    Probe,
}

impl DevconError {
    /// Shorthand for [`DevconError::InvalidConfig`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Wraps an engine error with the name of the failing operation.
    pub fn upstream(
        operation: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Upstream {
            operation,
            source: Box::new(source),
        }
    }

    /// Returns the taxonomy class of this error.
    ///
    /// An [`DevconError::Orphaned`] error reports the class of the
    /// failure that interrupted the start.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DaemonUnreachable { .. } => ErrorKind::DaemonUnreachable,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PortConflict { .. } => ErrorKind::PortConflict,
            Self::Upstream { .. } => ErrorKind::UpstreamFailure,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::Probe { .. } => ErrorKind::Probe,
            Self::Orphaned { source, .. } => source.kind(),
        }
    }

    /// Returns the orphaned container ID, if this error left one behind.
    #[must_use]
    pub const fn orphan(&self) -> Option<&ContainerId> {
        match self {
            Self::Orphaned { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DevconError>;
