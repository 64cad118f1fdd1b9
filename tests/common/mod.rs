// Shared test helpers: deterministic host probe

#![allow(dead_code)]

use appmonitor::error::{MonitorError, Result};
use appmonitor::models::*;
use appmonitor::probe::HostProbe;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

pub struct FakeProbe {
    pub heap: HeapUsage,
    pub memory: RuntimeMemory,
    pub process_cpu_load: f64,
    pub system_cpu_load: f64,
    pub os_name: String,
    pub os_version: String,
    pub processors: usize,
    pub load_average: f64,
    pub storage: Vec<(PathBuf, Option<StorageCapacity>)>,
    pub runtime_version: String,
    pub args: Vec<String>,
    pub start_time_ms: i64,
    pub uptime_ms: u64,
    pub library_path: String,
    pub module_path: String,
    pub properties: Vec<(String, String)>,
    pub threads: Vec<ThreadDetail>,
    /// Listed by thread_ids but gone by the time detail is requested.
    pub vanished: HashSet<u64>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self {
            heap: HeapUsage {
                init: 8 * 1024 * 1024,
                used: 1536,
                committed: 64 * 1024 * 1024,
                max: 2 * 1024 * 1024 * 1024,
            },
            memory: RuntimeMemory {
                free: 512,
                max: 4 * 1024 * 1024 * 1024,
                total: 1024,
            },
            process_cpu_load: 0.25,
            system_cpu_load: 0.5,
            os_name: "Linux".into(),
            os_version: "6.1.0".into(),
            processors: 8,
            load_average: 1.5,
            storage: vec![(
                PathBuf::from("/"),
                Some(StorageCapacity {
                    available: 1024 * 1024 * 1024,
                    total: 1024 * 1024 * 1024 * 1024,
                }),
            )],
            runtime_version: "appmonitor 0.1.0 (x86_64-linux)".into(),
            args: vec!["--verbose".into(), "report".into()],
            start_time_ms: 1_700_000_000_000,
            uptime_ms: 3_661_004,
            library_path: "/usr/lib".into(),
            module_path: "/usr/bin/appmonitor".into(),
            properties: vec![
                ("PATH".into(), "/usr/bin".into()),
                ("HOME".into(), "/root".into()),
            ],
            threads: vec![
                thread(1, "main", ThreadState::Runnable, 1_000),
                thread(2, "worker", ThreadState::Waiting, 250),
            ],
            vanished: HashSet::new(),
        }
    }
}

pub fn thread(tid: u64, name: &str, state: ThreadState, cpu_time_ns: u64) -> ThreadDetail {
    ThreadDetail {
        tid,
        name: name.into(),
        state,
        cpu_time_ns,
    }
}

impl HostProbe for FakeProbe {
    fn heap_usage(&self) -> HeapUsage {
        self.heap
    }

    fn runtime_memory(&self) -> RuntimeMemory {
        self.memory
    }

    fn process_cpu_load(&self) -> f64 {
        self.process_cpu_load
    }

    fn system_cpu_load(&self) -> f64 {
        self.system_cpu_load
    }

    fn os_name(&self) -> String {
        self.os_name.clone()
    }

    fn os_version(&self) -> String {
        self.os_version.clone()
    }

    fn available_processors(&self) -> usize {
        self.processors
    }

    fn system_load_average(&self) -> f64 {
        self.load_average
    }

    fn filesystem_roots(&self) -> Vec<PathBuf> {
        self.storage.iter().map(|(root, _)| root.clone()).collect()
    }

    fn storage_capacity(&self, root: &Path) -> Result<StorageCapacity> {
        let entry = self.storage.iter().find(|(r, _)| r == root);
        match entry {
            Some((_, Some(capacity))) => Ok(*capacity),
            _ => Err(MonitorError::StorageQueryFailed {
                root: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
            }),
        }
    }

    fn runtime_version(&self) -> String {
        self.runtime_version.clone()
    }

    fn input_arguments(&self) -> Vec<String> {
        self.args.clone()
    }

    fn start_time_ms(&self) -> i64 {
        self.start_time_ms
    }

    fn uptime_ms(&self) -> u64 {
        self.uptime_ms
    }

    fn library_path(&self) -> String {
        self.library_path.clone()
    }

    fn module_path(&self) -> String {
        self.module_path.clone()
    }

    fn system_properties(&self) -> Vec<(String, String)> {
        self.properties.clone()
    }

    fn thread_ids(&self) -> Vec<u64> {
        self.threads.iter().map(|t| t.tid).collect()
    }

    fn thread_detail(&self, tid: u64) -> Result<ThreadDetail> {
        let by_id: HashMap<u64, &ThreadDetail> = self.threads.iter().map(|t| (t.tid, t)).collect();
        match by_id.get(&tid) {
            Some(t) if !self.vanished.contains(&tid) => Ok((*t).clone()),
            _ => Err(MonitorError::ThreadInfoUnavailable {
                tid,
                source: io::Error::new(io::ErrorKind::NotFound, "no such thread"),
            }),
        }
    }
}
