//! Formatted output helpers for CLI commands.
//!
//! Renders container tables and snapshot reports as plain strings so
//! commands print them in one call.

use std::fmt::Write as _;

use devcon_common::stats::SystemStats;
use devcon_common::types::Container;

/// Formats a gigabyte figure with one decimal, switching to MB below 1 GB.
#[must_use]
pub fn format_gb(gb: f64) -> String {
    if gb >= 1.0 {
        format!("{gb:.1} GB")
    } else {
        format!("{:.0} MB", gb * 1024.0)
    }
}

/// Renders containers as an aligned `ID / IMAGE / STATUS` table.
#[must_use]
pub fn container_table(containers: &[Container]) -> String {
    let image_width = containers
        .iter()
        .map(|c| c.image.len())
        .max()
        .unwrap_or(0)
        .max("IMAGE".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<14} {:<image_width$} {}", "CONTAINER ID", "IMAGE", "STATUS");
    for c in containers {
        let _ = writeln!(out, "{:<14} {:<image_width$} {}", c.id.short(), c.image, c.status);
    }
    out
}

/// Renders a snapshot as a human-readable report.
#[must_use]
pub fn stats_report(stats: &SystemStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Host     {} ({} {} {}, kernel {})",
        stats.host.hostname,
        stats.host.os,
        stats.host.platform,
        stats.host.version,
        stats.host.kernel_version
    );
    let _ = writeln!(
        out,
        "CPU      {} | {} cores @ {:.0} MHz | {:.1}% busy",
        stats.cpu.model, stats.cpu.cores, stats.cpu.mhz, stats.cpu.usage
    );
    let _ = writeln!(
        out,
        "Memory   {} / {} ({:.1}%)",
        format_gb(stats.memory.used_gb),
        format_gb(stats.memory.total_gb),
        stats.memory.used_percent
    );
    let _ = writeln!(
        out,
        "Disk     {} / {} ({:.1}%), {} free on {}",
        format_gb(stats.disk.used_gb),
        format_gb(stats.disk.total_gb),
        stats.disk.used_percent,
        format_gb(stats.disk.free_gb),
        stats.disk.mount_point
    );
    out
}
