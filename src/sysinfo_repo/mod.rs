// Host probe backed by sysinfo, plus /proc for per-thread detail

mod linux;

use crate::error::{MonitorError, Result};
use crate::models::{HeapUsage, RuntimeMemory, StorageCapacity, ThreadDetail};
use crate::probe::{HostProbe, UNAVAILABLE};
use crate::version::{NAME, VERSION};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use sysinfo::{Disks, Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::{debug, instrument};

#[cfg(target_os = "windows")]
const LIBRARY_PATH_VAR: &str = "PATH";
#[cfg(target_os = "macos")]
const LIBRARY_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

pub struct SysinfoRepo {
    sys: Mutex<System>,
    pid: Option<Pid>,
    /// Resident set size when the repo was created; reported as heap init.
    initial_rss: u64,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let pid = sysinfo::get_current_pid().ok();
        let initial_rss = pid
            .and_then(|p| sys.process(p))
            .map(|p| p.memory())
            .unwrap_or(0);
        Self {
            sys: Mutex::new(sys),
            pid,
            initial_rss,
        }
    }

    fn sys(&self) -> MutexGuard<'_, System> {
        self.sys.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn refresh_own_process(&self, sys: &mut System, kind: ProcessRefreshKind) {
        if let Some(pid) = self.pid {
            sys.refresh_processes_specifics(ProcessesToUpdate::Some(&[pid]), true, kind);
        }
    }

    /// Measure CPU usage over its own window: baseline refresh, wait the
    /// minimum interval, refresh again. Other reads never move the baseline.
    fn refresh_cpu(&self, sys: &mut System) {
        let cpu_only = ProcessRefreshKind::nothing().with_cpu();
        sys.refresh_cpu_usage();
        self.refresh_own_process(sys, cpu_only);
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();
        self.refresh_own_process(sys, cpu_only);
    }

    fn measure_process_cpu_load(&self) -> Result<f64> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MonitorError::MetricUnavailable("process CPU load"));
        }
        let pid = self
            .pid
            .ok_or(MonitorError::MetricUnavailable("process CPU load"))?;
        let mut sys = self.sys();
        self.refresh_cpu(&mut sys);
        let cpus = sys.cpus().len();
        let process = sys
            .process(pid)
            .filter(|_| cpus > 0)
            .ok_or(MonitorError::MetricUnavailable("process CPU load"))?;
        // sysinfo reports 100% per fully used core.
        Ok((process.cpu_usage() as f64 / (100.0 * cpus as f64)).clamp(0.0, 1.0))
    }

    fn measure_system_cpu_load(&self) -> Result<f64> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MonitorError::MetricUnavailable("system CPU load"));
        }
        let mut sys = self.sys();
        self.refresh_cpu(&mut sys);
        if sys.cpus().is_empty() {
            return Err(MonitorError::MetricUnavailable("system CPU load"));
        }
        Ok((sys.global_cpu_usage() as f64 / 100.0).clamp(0.0, 1.0))
    }
}

impl HostProbe for SysinfoRepo {
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "heap_usage"))]
    fn heap_usage(&self) -> HeapUsage {
        let mut sys = self.sys();
        sys.refresh_memory();
        self.refresh_own_process(&mut sys, ProcessRefreshKind::nothing().with_memory());

        let (used, committed) = self
            .pid
            .and_then(|p| sys.process(p))
            .map(|p| (p.memory(), p.virtual_memory()))
            .unwrap_or((0, 0));
        let max = sys
            .cgroup_limits()
            .map(|c| c.total_memory)
            .filter(|&limit| limit > 0)
            .unwrap_or_else(|| sys.total_memory());

        HeapUsage {
            init: self.initial_rss,
            used,
            committed,
            max,
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "runtime_memory"))]
    fn runtime_memory(&self) -> RuntimeMemory {
        let mut sys = self.sys();
        sys.refresh_memory();
        RuntimeMemory {
            free: sys.free_memory(),
            max: sys.total_memory().saturating_add(sys.total_swap()),
            total: sys.total_memory(),
        }
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "process_cpu_load"))]
    fn process_cpu_load(&self) -> f64 {
        or_unavailable(self.measure_process_cpu_load())
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "system_cpu_load"))]
    fn system_cpu_load(&self) -> f64 {
        or_unavailable(self.measure_system_cpu_load())
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "os_name"))]
    fn os_name(&self) -> String {
        System::name().unwrap_or_else(|| std::env::consts::OS.into())
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "os_version"))]
    fn os_version(&self) -> String {
        System::kernel_version()
            .or_else(System::os_version)
            .unwrap_or_default()
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "available_processors"))]
    fn available_processors(&self) -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or_else(|_| self.sys().cpus().len().max(1))
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "system_load_average"))]
    fn system_load_average(&self) -> f64 {
        or_unavailable(measure_load_average())
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "filesystem_roots"))]
    fn filesystem_roots(&self) -> Vec<PathBuf> {
        Disks::new_with_refreshed_list()
            .list()
            .iter()
            .map(|d| d.mount_point().to_path_buf())
            .collect()
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "storage_capacity"))]
    fn storage_capacity(&self, root: &Path) -> Result<StorageCapacity> {
        let disks = Disks::new_with_refreshed_list();
        disks
            .list()
            .iter()
            .find(|d| d.mount_point() == root)
            .map(|d| StorageCapacity {
                available: d.available_space(),
                total: d.total_space(),
            })
            .ok_or_else(|| MonitorError::StorageQueryFailed {
                root: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "filesystem no longer mounted"),
            })
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "runtime_version"))]
    fn runtime_version(&self) -> String {
        format!(
            "{} {} ({}-{})",
            NAME,
            VERSION,
            std::env::consts::ARCH,
            std::env::consts::OS
        )
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "input_arguments"))]
    fn input_arguments(&self) -> Vec<String> {
        std::env::args_os()
            .skip(1)
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "start_time_ms"))]
    fn start_time_ms(&self) -> i64 {
        if let Some(uptime) = linux::process_uptime_ms() {
            let now_ms = chrono::Utc::now().timestamp_millis();
            return now_ms.saturating_sub(i64::try_from(uptime).unwrap_or(i64::MAX));
        }
        // sysinfo only knows the start to the second.
        let sys = self.sys();
        self.pid
            .and_then(|p| sys.process(p))
            .map(|p| i64::try_from(p.start_time()).unwrap_or(i64::MAX).saturating_mul(1000))
            .unwrap_or(0)
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "uptime_ms"))]
    fn uptime_ms(&self) -> u64 {
        if let Some(uptime) = linux::process_uptime_ms() {
            return uptime;
        }
        let now_ms = chrono::Utc::now().timestamp_millis();
        u64::try_from(now_ms.saturating_sub(self.start_time_ms())).unwrap_or(0)
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "library_path"))]
    fn library_path(&self) -> String {
        std::env::var_os(LIBRARY_PATH_VAR)
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "module_path"))]
    fn module_path(&self) -> String {
        std::env::current_exe()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "system_properties"))]
    fn system_properties(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "thread_ids"))]
    fn thread_ids(&self) -> Vec<u64> {
        linux::list_thread_ids()
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "thread_detail"))]
    fn thread_detail(&self, tid: u64) -> Result<ThreadDetail> {
        linux::read_thread_detail(tid)
            .map_err(|source| MonitorError::ThreadInfoUnavailable { tid, source })
    }
}

fn measure_load_average() -> Result<f64> {
    if cfg!(target_os = "windows") || !sysinfo::IS_SUPPORTED_SYSTEM {
        return Err(MonitorError::MetricUnavailable("system load average"));
    }
    Ok(System::load_average().one)
}

/// Collapse an unsupported counter into the sentinel so the report always completes.
fn or_unavailable(reading: Result<f64>) -> f64 {
    reading.unwrap_or_else(|e| {
        debug!(error = %e, "reporting sentinel");
        UNAVAILABLE
    })
}
