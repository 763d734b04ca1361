//! # devcon-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the devcon workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and holds the value objects that the runtime and the
//! CLI exchange: containers, creation requests, and metric snapshots.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod stats;
pub mod types;
