// Library for tests to access modules

pub mod byte_size;
pub mod config;
pub mod error;
pub mod models;
pub mod probe;
pub mod report;
pub mod snapshot;
pub mod sysinfo_repo;
pub mod uptime;
pub mod version;

pub use error::{MonitorError, Result};
pub use probe::HostProbe;
pub use snapshot::SystemSnapshot;
