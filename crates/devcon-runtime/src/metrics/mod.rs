//! Host resource metrics.
//!
//! [`MetricsProbe`] is the boundary to the hardware probe;
//! [`MetricsAggregator`] composes its calls into one [`SystemStats`]
//! snapshot, failing as a whole if any sub-call fails.

pub mod host;

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use devcon_common::config::DevconConfig;
use devcon_common::error::{DevconError, Result};
use devcon_common::stats::{
    CpuInfo, DiskInfo, HostInfo, MemoryInfo, SystemStats, bytes_to_gb, percent_of,
};
use tokio_util::sync::CancellationToken;

/// Static CPU description.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuDescriptor {
    /// Marketing model name.
    pub model: String,
    /// Physical core count.
    pub cores: usize,
    /// Clock frequency in MHz.
    pub mhz: f64,
}

/// Raw memory figures in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReading {
    /// Installed memory.
    pub total_bytes: u64,
    /// Memory in use.
    pub used_bytes: u64,
}

/// Raw filesystem figures in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskReading {
    /// Filesystem size.
    pub total_bytes: u64,
    /// Space in use.
    pub used_bytes: u64,
    /// Space available to unprivileged users.
    pub free_bytes: u64,
}

/// Capability set the aggregator consumes from the hardware probe.
#[async_trait]
pub trait MetricsProbe: Send + Sync {
    /// Describes the first CPU.
    ///
    /// # Errors
    ///
    /// Returns `Probe` if no CPU can be read.
    async fn cpu_info(&self, cancel: &CancellationToken) -> Result<CpuDescriptor>;

    /// Samples overall CPU busy-percent over `window`.
    ///
    /// Suspends the caller for the whole window.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if `cancel` fires during the window.
    async fn cpu_percent(&self, window: Duration, cancel: &CancellationToken) -> Result<f64>;

    /// Reads physical memory usage.
    ///
    /// # Errors
    ///
    /// Returns `Probe` if memory cannot be read.
    async fn memory(&self, cancel: &CancellationToken) -> Result<MemoryReading>;

    /// Reads usage of the filesystem mounted at `mount`.
    ///
    /// # Errors
    ///
    /// Returns `Probe` if nothing is mounted at `mount`.
    async fn disk_usage(&self, mount: &Path, cancel: &CancellationToken) -> Result<DiskReading>;

    /// Identifies the host.
    ///
    /// # Errors
    ///
    /// Returns `Probe` if host details cannot be read.
    async fn host_info(&self, cancel: &CancellationToken) -> Result<HostInfo>;
}

/// Builds [`SystemStats`] snapshots from a [`MetricsProbe`].
///
/// Holds no readings between calls; every snapshot re-queries all
/// sources and concurrent callers each pay the CPU sampling window.
pub struct MetricsAggregator {
    probe: Box<dyn MetricsProbe>,
    disk_mount: PathBuf,
    sample_window: Duration,
}

impl MetricsAggregator {
    /// Creates an aggregator reading `disk_mount` and sampling CPU over
    /// `sample_window`.
    #[must_use]
    pub fn new(probe: Box<dyn MetricsProbe>, disk_mount: PathBuf, sample_window: Duration) -> Self {
        Self {
            probe,
            disk_mount,
            sample_window,
        }
    }

    /// Creates an aggregator with the mount point and window from `config`.
    #[must_use]
    pub fn from_config(probe: Box<dyn MetricsProbe>, config: &DevconConfig) -> Self {
        Self::new(probe, config.disk_mount.clone(), config.cpu_sample_window)
    }

    /// Takes one snapshot, querying CPU, memory, disk, and host in order.
    ///
    /// # Errors
    ///
    /// Returns the first sub-call error, or `Probe` if a reading is
    /// inconsistent (used above total, non-finite CPU percent). No
    /// partial snapshot is ever returned.
    pub async fn snapshot(&self, cancel: &CancellationToken) -> Result<SystemStats> {
        let cpu = self.probe.cpu_info(cancel).await?;
        let usage = self.probe.cpu_percent(self.sample_window, cancel).await?;
        if !usage.is_finite() {
            return Err(probe_error("cpu", format!("non-finite usage {usage}")));
        }
        let memory = self.probe.memory(cancel).await?;
        let disk = self.probe.disk_usage(&self.disk_mount, cancel).await?;
        let host = self.probe.host_info(cancel).await?;

        let stats = SystemStats {
            cpu: CpuInfo {
                model: cpu.model,
                cores: cpu.cores,
                mhz: cpu.mhz,
                usage,
            },
            memory: memory_info(memory)?,
            disk: disk_info(&self.disk_mount, disk)?,
            host,
            taken_at: chrono::Utc::now(),
        };
        tracing::debug!(
            cpu = stats.cpu.usage,
            memory = stats.memory.used_percent,
            disk = stats.disk.used_percent,
            "system snapshot taken"
        );
        Ok(stats)
    }
}

fn memory_info(reading: MemoryReading) -> Result<MemoryInfo> {
    if reading.used_bytes > reading.total_bytes {
        return Err(probe_error(
            "memory",
            format!(
                "used {} bytes exceeds total {} bytes",
                reading.used_bytes, reading.total_bytes
            ),
        ));
    }
    Ok(MemoryInfo {
        total_gb: bytes_to_gb(reading.total_bytes),
        used_gb: bytes_to_gb(reading.used_bytes),
        used_percent: percent_of(reading.used_bytes, reading.total_bytes),
    })
}

fn disk_info(mount: &Path, reading: DiskReading) -> Result<DiskInfo> {
    if reading.used_bytes > reading.total_bytes || reading.free_bytes > reading.total_bytes {
        return Err(probe_error(
            "disk",
            format!(
                "used {} / free {} bytes exceed total {} bytes on {}",
                reading.used_bytes,
                reading.free_bytes,
                reading.total_bytes,
                mount.display()
            ),
        ));
    }
    Ok(DiskInfo {
        mount_point: mount.display().to_string(),
        total_gb: bytes_to_gb(reading.total_bytes),
        used_gb: bytes_to_gb(reading.used_bytes),
        free_gb: bytes_to_gb(reading.free_bytes),
        used_percent: percent_of(reading.used_bytes, reading.total_bytes),
    })
}

pub(crate) fn probe_error(component: &'static str, message: impl Into<String>) -> DevconError {
    DevconError::Probe {
        component,
        message: message.into(),
    }
}
