// Filesystem root capacity

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageCapacity {
    /// Bytes usable by this process.
    pub available: u64,
    pub total: u64,
}
