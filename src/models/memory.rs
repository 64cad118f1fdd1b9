// Process and host memory readings (raw byte counts)

/// Heap-style usage of the current process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapUsage {
    /// Resident size observed when instrumentation started.
    pub init: u64,
    pub used: u64,
    pub committed: u64,
    pub max: u64,
}

/// Memory totals as seen by the runtime: free, upper bound, and currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeMemory {
    pub free: u64,
    pub max: u64,
    pub total: u64,
}
