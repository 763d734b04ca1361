//! Container lifecycle orchestration and host metrics for the devcon agent.
//!
//! Data flows one way: [`orchestrator::Orchestrator`] calls
//! [`service::ContainerService`] and [`metrics::MetricsAggregator`], which
//! call the engine and probe ports in [`backend`] and [`metrics`].

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod backend;
pub mod cancel;
pub mod metrics;
pub mod orchestrator;
pub mod service;

pub use orchestrator::Orchestrator;
pub use service::{ContainerService, ProvisionOutcome};
