//! Metrics probe backed by `sysinfo`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use devcon_common::error::Result;
use devcon_common::stats::HostInfo;
use sysinfo::{Disks, System};
use tokio_util::sync::CancellationToken;

use super::{CpuDescriptor, DiskReading, MemoryReading, MetricsProbe, probe_error};
use crate::cancel::{check, guarded};

const UNKNOWN: &str = "unknown";

/// Reads CPU, memory, disk, and host details of the local machine.
///
/// Each call builds a fresh `sysinfo` view; nothing is cached.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProbe;

impl HostProbe {
    /// Creates a probe for the local host.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricsProbe for HostProbe {
    #[allow(clippy::cast_precision_loss)]
    async fn cpu_info(&self, cancel: &CancellationToken) -> Result<CpuDescriptor> {
        check(cancel, "read cpu info")?;
        let mut sys = System::new();
        sys.refresh_cpu_all();
        let cpu = sys
            .cpus()
            .first()
            .ok_or_else(|| probe_error("cpu", "no CPU reported"))?;
        let descriptor = CpuDescriptor {
            model: cpu.brand().trim().to_string(),
            cores: System::physical_core_count().unwrap_or(sys.cpus().len()),
            mhz: cpu.frequency() as f64,
        };
        tracing::debug!(model = %descriptor.model, cores = descriptor.cores, "read cpu info");
        Ok(descriptor)
    }

    async fn cpu_percent(&self, window: Duration, cancel: &CancellationToken) -> Result<f64> {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        let window = window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        guarded(cancel, "sample cpu", async {
            tokio::time::sleep(window).await;
            Ok(())
        })
        .await?;
        sys.refresh_cpu_usage();
        Ok(f64::from(sys.global_cpu_usage()))
    }

    async fn memory(&self, cancel: &CancellationToken) -> Result<MemoryReading> {
        check(cancel, "read memory")?;
        let mut sys = System::new();
        sys.refresh_memory();
        let total_bytes = sys.total_memory();
        if total_bytes == 0 {
            return Err(probe_error("memory", "total memory reported as zero"));
        }
        Ok(MemoryReading {
            total_bytes,
            used_bytes: sys.used_memory(),
        })
    }

    async fn disk_usage(&self, mount: &Path, cancel: &CancellationToken) -> Result<DiskReading> {
        check(cancel, "read disk usage")?;
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == mount)
            .ok_or_else(|| {
                probe_error("disk", format!("no filesystem mounted at {}", mount.display()))
            })?;
        let total_bytes = disk.total_space();
        let free_bytes = disk.available_space();
        Ok(DiskReading {
            total_bytes,
            used_bytes: total_bytes.saturating_sub(free_bytes),
            free_bytes,
        })
    }

    async fn host_info(&self, cancel: &CancellationToken) -> Result<HostInfo> {
        check(cancel, "read host info")?;
        let hostname = System::host_name().ok_or_else(|| probe_error("host", "hostname unavailable"))?;
        Ok(HostInfo {
            hostname,
            os: std::env::consts::OS.to_string(),
            platform: System::name().unwrap_or_else(|| UNKNOWN.to_string()),
            version: System::os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            kernel_version: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string()),
        })
    }
}
