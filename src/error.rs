// Error taxonomy for metric collection and formatting

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// A byte count below 1 was handed to the formatter. Caller bug, never recovered.
    #[error("Invalid memory size: {0}")]
    InvalidArgument(i64),

    /// The platform does not expose this counter.
    #[error("metric unavailable: {0}")]
    MetricUnavailable(&'static str),

    #[error("storage query failed for {}: {source}", .root.display())]
    StorageQueryFailed {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The thread exited between enumeration and detail lookup.
    #[error("thread {tid} info unavailable: {source}")]
    ThreadInfoUnavailable {
        tid: u64,
        #[source]
        source: io::Error,
    },
}
