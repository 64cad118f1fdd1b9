// Host introspection capability consumed by SystemSnapshot

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{HeapUsage, RuntimeMemory, StorageCapacity, ThreadDetail};

/// Returned by loads and averages the platform cannot measure.
pub const UNAVAILABLE: f64 = -1.0;

/// Raw readings of process and host state.
///
/// Every method is a fresh read. Implementations return [`UNAVAILABLE`] for
/// unsupported loads instead of failing; only storage and thread lookups can
/// error, and those errors are scoped to a single root or thread.
pub trait HostProbe: Send + Sync {
    fn heap_usage(&self) -> HeapUsage;
    fn runtime_memory(&self) -> RuntimeMemory;

    /// Fraction of total CPU capacity used by this process, or [`UNAVAILABLE`].
    fn process_cpu_load(&self) -> f64;
    /// Fraction of total CPU capacity used system-wide, or [`UNAVAILABLE`].
    fn system_cpu_load(&self) -> f64;
    fn os_name(&self) -> String;
    fn os_version(&self) -> String;
    fn available_processors(&self) -> usize;
    /// One-minute load average, or [`UNAVAILABLE`].
    fn system_load_average(&self) -> f64;

    fn filesystem_roots(&self) -> Vec<PathBuf>;
    fn storage_capacity(&self, root: &Path) -> Result<StorageCapacity>;

    fn runtime_version(&self) -> String;
    fn input_arguments(&self) -> Vec<String>;
    /// Process start, milliseconds since the Unix epoch.
    fn start_time_ms(&self) -> i64;
    fn uptime_ms(&self) -> u64;
    fn library_path(&self) -> String;
    fn module_path(&self) -> String;
    /// Key/value configuration in the order the platform yields it.
    fn system_properties(&self) -> Vec<(String, String)>;

    /// Ids of all live threads of this process at call time.
    fn thread_ids(&self) -> Vec<u64>;
    fn thread_detail(&self, tid: u64) -> Result<ThreadDetail>;
}
