// Raw metric readings returned by a host probe

mod memory;
mod storage;
mod thread;

pub use memory::{HeapUsage, RuntimeMemory};
pub use storage::StorageCapacity;
pub use thread::{ThreadDetail, ThreadState};
