//! In-memory engine and probe fakes shared by the integration tests.

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use devcon_common::config::DevconConfig;
use devcon_common::error::{DevconError, Result};
use devcon_common::stats::HostInfo;
use devcon_common::types::{Container, ContainerCfg, ContainerId, WorkloadState};
use devcon_runtime::backend::ContainerBackend;
use devcon_runtime::cancel::check;
use devcon_runtime::metrics::{CpuDescriptor, DiskReading, MemoryReading, MetricsProbe};
use devcon_runtime::Orchestrator;
use tokio_util::sync::CancellationToken;

pub const GIB: u64 = 1024 * 1024 * 1024;

/// Failure a fake call can be told to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Unreachable,
    Upstream,
    PortConflict,
}

impl Fault {
    fn into_error(self, operation: &'static str) -> DevconError {
        match self {
            Self::Unreachable => DevconError::DaemonUnreachable {
                message: "connection refused".into(),
            },
            Self::Upstream => DevconError::upstream(operation, std::io::Error::other("engine exploded")),
            Self::PortConflict => DevconError::PortConflict {
                port: "3000".into(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeContainer {
    pub id: String,
    pub name: String,
    pub image: String,
    pub state: WorkloadState,
}

#[derive(Default)]
struct EngineState {
    containers: Vec<FakeContainer>,
    calls: Vec<&'static str>,
    ping_fault: Option<Fault>,
    list_fault: Option<Fault>,
    create_fault: Option<Fault>,
    start_fault: Option<Fault>,
    next_id: Option<String>,
    cancel_on_create: Option<CancellationToken>,
}

/// Engine fake that tracks containers and records every port call.
#[derive(Clone, Default)]
pub struct FakeEngine {
    state: Arc<Mutex<EngineState>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(self, id: &str, image: &str, state: WorkloadState) -> Self {
        self.state.lock().unwrap().containers.push(FakeContainer {
            id: id.into(),
            name: format!("c-{id}"),
            image: image.into(),
            state,
        });
        self
    }

    pub fn fail_ping(self, fault: Fault) -> Self {
        self.state.lock().unwrap().ping_fault = Some(fault);
        self
    }

    pub fn fail_list(self, fault: Fault) -> Self {
        self.state.lock().unwrap().list_fault = Some(fault);
        self
    }

    pub fn fail_create(self, fault: Fault) -> Self {
        self.state.lock().unwrap().create_fault = Some(fault);
        self
    }

    pub fn fail_start(self, fault: Fault) -> Self {
        self.state.lock().unwrap().start_fault = Some(fault);
        self
    }

    /// Makes the next create return `id`.
    pub fn next_id(self, id: &str) -> Self {
        self.state.lock().unwrap().next_id = Some(id.into());
        self
    }

    /// Fires `token` while the create call is in flight.
    pub fn cancel_during_create(self, token: CancellationToken) -> Self {
        self.state.lock().unwrap().cancel_on_create = Some(token);
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self) -> usize {
        self.state.lock().unwrap().containers.len()
    }

    pub fn state_of(&self, id: &str) -> Option<WorkloadState> {
        self.state
            .lock()
            .unwrap()
            .containers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.state)
    }

    pub fn boxed(&self) -> Box<dyn ContainerBackend> {
        Box::new(self.clone())
    }

    fn enter(&self, operation: &'static str, cancel: &CancellationToken) -> Result<()> {
        check(cancel, operation)?;
        self.state.lock().unwrap().calls.push(operation);
        Ok(())
    }
}

fn status(state: WorkloadState) -> String {
    match state {
        WorkloadState::Running => "running".into(),
        WorkloadState::Stopped => "exited".into(),
        other => other.to_string(),
    }
}

fn transition(container: &mut FakeContainer, next: WorkloadState) -> Result<()> {
    if !container.state.can_transition_to(next) {
        return Err(DevconError::Conflict {
            message: format!("container {} is {}", container.id, container.state),
        });
    }
    container.state = next;
    Ok(())
}

#[async_trait]
impl ContainerBackend for FakeEngine {
    async fn ping(&self, cancel: &CancellationToken) -> Result<()> {
        self.enter("ping", cancel)?;
        match self.state.lock().unwrap().ping_fault {
            Some(fault) => Err(fault.into_error("ping daemon")),
            None => Ok(()),
        }
    }

    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Container>> {
        self.enter("list", cancel)?;
        let state = self.state.lock().unwrap();
        if let Some(fault) = state.list_fault {
            return Err(fault.into_error("list containers"));
        }
        Ok(state
            .containers
            .iter()
            .map(|c| Container {
                id: ContainerId::new(c.id.clone()),
                image: c.image.clone(),
                status: status(c.state),
            })
            .collect())
    }

    async fn create(&self, cfg: &ContainerCfg, cancel: &CancellationToken) -> Result<ContainerId> {
        self.enter("create", cancel)?;
        let mut state = self.state.lock().unwrap();
        if let Some(fault) = state.create_fault {
            return Err(fault.into_error("create container"));
        }
        if !cfg.name.is_empty() && state.containers.iter().any(|c| c.name == cfg.name) {
            return Err(DevconError::Conflict {
                message: format!("name {} in use", cfg.name),
            });
        }
        let id = state
            .next_id
            .take()
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
        state.containers.push(FakeContainer {
            id: id.clone(),
            name: cfg.name.clone(),
            image: cfg.image.clone(),
            state: WorkloadState::Created,
        });
        if let Some(token) = state.cancel_on_create.take() {
            token.cancel();
        }
        Ok(ContainerId::new(id))
    }

    async fn start(&self, id: &ContainerId, cancel: &CancellationToken) -> Result<()> {
        self.enter("start", cancel)?;
        let mut state = self.state.lock().unwrap();
        if let Some(fault) = state.start_fault {
            return Err(fault.into_error("start container"));
        }
        let container = state
            .containers
            .iter_mut()
            .find(|c| c.id == id.as_str())
            .ok_or_else(|| DevconError::NotFound {
                kind: "container",
                id: id.to_string(),
            })?;
        transition(container, WorkloadState::Running)
    }

    async fn stop(&self, id: &ContainerId, cancel: &CancellationToken) -> Result<()> {
        self.enter("stop", cancel)?;
        let mut state = self.state.lock().unwrap();
        let container = state
            .containers
            .iter_mut()
            .find(|c| c.id == id.as_str())
            .ok_or_else(|| DevconError::NotFound {
                kind: "container",
                id: id.to_string(),
            })?;
        transition(container, WorkloadState::Stopped)
    }

    async fn remove(&self, id: &ContainerId, cancel: &CancellationToken) -> Result<()> {
        self.enter("remove", cancel)?;
        let mut state = self.state.lock().unwrap();
        let index = state
            .containers
            .iter()
            .position(|c| c.id == id.as_str())
            .ok_or_else(|| DevconError::NotFound {
                kind: "container",
                id: id.to_string(),
            })?;
        transition(&mut state.containers[index], WorkloadState::Absent)?;
        let _ = state.containers.remove(index);
        Ok(())
    }
}

#[derive(Clone)]
struct ProbeState {
    memory: MemoryReading,
    disk: DiskReading,
    cpu_percent: f64,
    disk_fails: bool,
    calls: Vec<&'static str>,
    windows: Vec<Duration>,
    mounts: Vec<PathBuf>,
}

/// Probe fake returning fixed readings.
#[derive(Clone)]
pub struct FakeProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(ProbeState {
                memory: MemoryReading {
                    total_bytes: 16 * GIB,
                    used_bytes: 4 * GIB,
                },
                disk: DiskReading {
                    total_bytes: 512 * GIB,
                    used_bytes: 128 * GIB,
                    free_bytes: 384 * GIB,
                },
                cpu_percent: 37.5,
                disk_fails: false,
                calls: Vec::new(),
                windows: Vec::new(),
                mounts: Vec::new(),
            })),
        }
    }
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(self, total_bytes: u64, used_bytes: u64) -> Self {
        self.state.lock().unwrap().memory = MemoryReading {
            total_bytes,
            used_bytes,
        };
        self
    }

    pub fn disk(self, total_bytes: u64, used_bytes: u64, free_bytes: u64) -> Self {
        self.state.lock().unwrap().disk = DiskReading {
            total_bytes,
            used_bytes,
            free_bytes,
        };
        self
    }

    pub fn fail_disk(self) -> Self {
        self.state.lock().unwrap().disk_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn windows(&self) -> Vec<Duration> {
        self.state.lock().unwrap().windows.clone()
    }

    pub fn mounts(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().mounts.clone()
    }

    pub fn boxed(&self) -> Box<dyn MetricsProbe> {
        Box::new(self.clone())
    }

    fn enter(&self, operation: &'static str, cancel: &CancellationToken) -> Result<()> {
        check(cancel, operation)?;
        self.state.lock().unwrap().calls.push(operation);
        Ok(())
    }
}

#[async_trait]
impl MetricsProbe for FakeProbe {
    async fn cpu_info(&self, cancel: &CancellationToken) -> Result<CpuDescriptor> {
        self.enter("cpu_info", cancel)?;
        Ok(CpuDescriptor {
            model: "Fake CPU @ 3.00GHz".into(),
            cores: 8,
            mhz: 3000.0,
        })
    }

    async fn cpu_percent(&self, window: Duration, cancel: &CancellationToken) -> Result<f64> {
        self.enter("cpu_percent", cancel)?;
        let mut state = self.state.lock().unwrap();
        state.windows.push(window);
        Ok(state.cpu_percent)
    }

    async fn memory(&self, cancel: &CancellationToken) -> Result<MemoryReading> {
        self.enter("memory", cancel)?;
        Ok(self.state.lock().unwrap().memory)
    }

    async fn disk_usage(&self, mount: &Path, cancel: &CancellationToken) -> Result<DiskReading> {
        self.enter("disk_usage", cancel)?;
        let mut state = self.state.lock().unwrap();
        state.mounts.push(mount.to_path_buf());
        if state.disk_fails {
            return Err(DevconError::Probe {
                component: "disk",
                message: format!("no filesystem mounted at {}", mount.display()),
            });
        }
        Ok(state.disk)
    }

    async fn host_info(&self, cancel: &CancellationToken) -> Result<HostInfo> {
        self.enter("host_info", cancel)?;
        Ok(HostInfo {
            hostname: "devbox".into(),
            os: "linux".into(),
            platform: "ubuntu".into(),
            version: "24.04".into(),
            kernel_version: "6.8.0".into(),
        })
    }
}

pub fn devcon_cfg() -> ContainerCfg {
    ContainerCfg {
        image: "devcon:latest".into(),
        name: "devcon".into(),
        container_port: "3000".into(),
        host_port: "3000".into(),
    }
}

pub fn orchestrator(engine: &FakeEngine) -> Orchestrator {
    Orchestrator::new(engine.boxed(), FakeProbe::new().boxed(), &DevconConfig::default())
}
