//! Point-in-time host resource snapshot.
//!
//! Every figure is converted to gigabytes once, when the snapshot is
//! assembled, and the values are never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::BYTES_PER_GB;

/// CPU model and utilisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    /// Marketing model name of the first CPU.
    pub model: String,
    /// Physical core count.
    pub cores: usize,
    /// Clock frequency in MHz.
    pub mhz: f64,
    /// Busy percentage over the sampling window.
    #[serde(rename = "usage_percent")]
    pub usage: f64,
}

/// Physical memory usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Installed memory in GB.
    pub total_gb: f64,
    /// Memory in use in GB.
    pub used_gb: f64,
    /// Share of memory in use, `0..=100`.
    pub used_percent: f64,
}

/// Usage of a single mounted filesystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskInfo {
    /// Mount point the figures belong to.
    pub mount_point: String,
    /// Filesystem size in GB.
    pub total_gb: f64,
    /// Space in use in GB.
    pub used_gb: f64,
    /// Space available in GB.
    pub free_gb: f64,
    /// Share of space in use, `0..=100`.
    pub used_percent: f64,
}

/// Host identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    /// Host name.
    pub hostname: String,
    /// Operating system family (`linux`, `macos`, `windows`).
    pub os: String,
    /// Distribution or platform name.
    pub platform: String,
    /// Platform version.
    pub version: String,
    /// Kernel version.
    pub kernel_version: String,
}

/// Composite, immutable reading of host resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    /// CPU reading.
    pub cpu: CpuInfo,
    /// Memory reading.
    pub memory: MemoryInfo,
    /// Disk reading.
    pub disk: DiskInfo,
    /// Host identification.
    pub host: HostInfo,
    /// When the snapshot was assembled.
    pub taken_at: DateTime<Utc>,
}

/// Converts a byte count to gigabytes (`bytes / 1024^3`).
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

/// Returns `part` as a percentage of `whole`, or `0` when `whole` is zero.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
