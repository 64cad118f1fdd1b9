// SystemSnapshot: one accessor per metric, each a fresh read through the probe

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::byte_size::format_u64;
use crate::probe::HostProbe;
use crate::report::LINE_SEPARATOR;
use crate::sysinfo_repo::SysinfoRepo;
use crate::uptime::format_uptime;

/// Rendered in place of a value the platform did not provide.
pub const NOT_AVAILABLE: &str = "n/a";

const START_TIME_FORMAT: &str = "%a %b %d %H:%M:%S %Z %Y";

pub struct SystemSnapshot<P: HostProbe = SysinfoRepo> {
    probe: P,
}

impl SystemSnapshot<SysinfoRepo> {
    /// Snapshot of the real host and current process.
    pub fn new() -> Self {
        Self::with_probe(SysinfoRepo::new())
    }
}

impl Default for SystemSnapshot<SysinfoRepo> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: HostProbe> SystemSnapshot<P> {
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    // memory

    pub fn heap_init(&self) -> String {
        render_bytes("heap init", self.probe.heap_usage().init)
    }

    pub fn heap_used(&self) -> String {
        render_bytes("heap used", self.probe.heap_usage().used)
    }

    pub fn heap_committed(&self) -> String {
        render_bytes("heap committed", self.probe.heap_usage().committed)
    }

    pub fn heap_max(&self) -> String {
        render_bytes("heap max", self.probe.heap_usage().max)
    }

    pub fn free_memory(&self) -> String {
        render_bytes("free memory", self.probe.runtime_memory().free)
    }

    pub fn max_memory(&self) -> String {
        render_bytes("max memory", self.probe.runtime_memory().max)
    }

    pub fn total_memory(&self) -> String {
        render_bytes("total memory", self.probe.runtime_memory().total)
    }

    // cpu / os

    /// Fraction 0.0..=1.0, or a negative sentinel when unavailable. Never normalized.
    pub fn process_cpu_load(&self) -> f64 {
        self.probe.process_cpu_load()
    }

    pub fn system_cpu_load(&self) -> f64 {
        self.probe.system_cpu_load()
    }

    pub fn system_name(&self) -> String {
        self.probe.os_name()
    }

    pub fn system_version(&self) -> String {
        self.probe.os_version()
    }

    pub fn available_processors(&self) -> usize {
        self.probe.available_processors()
    }

    /// One-minute load average; -1 where the platform has none.
    pub fn system_load(&self) -> f64 {
        self.probe.system_load_average()
    }

    /// One `root: available=.., total=..` line per filesystem root. A failing
    /// root gets an error line; the remaining roots are still queried.
    pub fn storage_metrics(&self) -> String {
        let mut out = String::new();
        for root in self.probe.filesystem_roots() {
            out.push_str(&format!("{}: ", root.display()));
            match self.probe.storage_capacity(&root) {
                Ok(capacity) => out.push_str(&format!(
                    "available={}, total={}",
                    render_bytes("available space", capacity.available),
                    render_bytes("total space", capacity.total)
                )),
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "storage query failed");
                    out.push_str(&format!("error querying space: {}", e));
                }
            }
            out.push_str(LINE_SEPARATOR);
        }
        out
    }

    // runtime

    pub fn runtime_version(&self) -> String {
        self.probe.runtime_version()
    }

    pub fn input_arguments(&self) -> String {
        self.probe.input_arguments().join(", ")
    }

    pub fn start_time(&self) -> String {
        let ms = self.probe.start_time_ms();
        match DateTime::from_timestamp_millis(ms) {
            Some(utc) => utc
                .with_timezone(&Local)
                .format(START_TIME_FORMAT)
                .to_string(),
            None => {
                debug!(start_time_ms = ms, "start time out of range");
                NOT_AVAILABLE.to_string()
            }
        }
    }

    pub fn up_time(&self) -> String {
        format_uptime(self.probe.uptime_ms())
    }

    pub fn library_path(&self) -> String {
        self.probe.library_path()
    }

    pub fn module_path(&self) -> String {
        self.probe.module_path()
    }

    /// `key = value` lines, platform order.
    pub fn system_properties(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.probe.system_properties() {
            out.push_str(&format!("{} = {}", key, value));
            out.push_str(LINE_SEPARATOR);
        }
        out
    }

    // threads

    pub fn thread_count(&self) -> usize {
        self.probe.thread_ids().len()
    }

    /// Name, state and CPU time of every live thread. A thread that exits
    /// mid-listing gets a placeholder entry.
    pub fn thread_statuses(&self) -> String {
        let mut out = String::new();
        for tid in self.probe.thread_ids() {
            let entry = match self.probe.thread_detail(tid) {
                Ok(info) => format!(
                    "Thread name =  {}{sep}\tstate = {}{sep}\tCPU time = {} ns",
                    info.name,
                    info.state,
                    info.cpu_time_ns,
                    sep = LINE_SEPARATOR
                ),
                Err(e) => {
                    debug!(tid, error = %e, "thread vanished during listing");
                    format!("Thread {}: info unavailable ({})", tid, e)
                }
            };
            out.push_str(&entry);
            out.push_str(LINE_SEPARATOR);
        }
        out
    }
}

/// Format a byte counter for the report. Zero means the platform did not
/// supply the counter; that renders as [`NOT_AVAILABLE`] instead of failing.
fn render_bytes(metric: &'static str, bytes: u64) -> String {
    format_u64(bytes).unwrap_or_else(|e| {
        debug!(metric, error = %e, "byte counter not reportable");
        NOT_AVAILABLE.to_string()
    })
}
