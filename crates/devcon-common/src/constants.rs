//! System-wide constants and defaults.

use std::time::Duration;

/// Image tag of the devcon web workload.
pub const DEVCON_IMAGE: &str = "abhishekkkk-15/devcon:latest";

/// Container name given to the devcon web workload.
pub const DEVCON_CONTAINER_NAME: &str = "devcon";

/// Port the devcon web workload listens on inside its container.
pub const DEVCON_CONTAINER_PORT: &str = "3000";

/// Host port the workload is published on when none is given.
pub const DEFAULT_HOST_PORT: &str = "3000";

/// Address host ports are bound to.
pub const HOST_BIND_ADDR: &str = "0.0.0.0";

/// Mount point whose usage is reported in system snapshots.
pub const DEFAULT_DISK_MOUNT: &str = "/";

/// Window over which CPU busy-percent is sampled.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Bytes per gigabyte used for every GB figure in a snapshot.
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Number of characters shown for a shortened container ID.
pub const SHORT_ID_LEN: usize = 12;

/// Binary name for the CLI.
pub const BIN_NAME: &str = "devcon";
