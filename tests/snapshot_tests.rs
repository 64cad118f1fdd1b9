// SystemSnapshot accessors against a deterministic probe

mod common;

use appmonitor::models::{HeapUsage, StorageCapacity, ThreadState};
use appmonitor::probe::UNAVAILABLE;
use appmonitor::report::LINE_SEPARATOR;
use appmonitor::snapshot::{NOT_AVAILABLE, SystemSnapshot};
use appmonitor::uptime::{decompose, format_uptime};
use chrono::{DateTime, Local};
use common::{FakeProbe, thread};
use std::path::PathBuf;

fn snapshot(probe: FakeProbe) -> SystemSnapshot<FakeProbe> {
    SystemSnapshot::with_probe(probe)
}

#[test]
fn memory_accessors_format_byte_counts() {
    let s = snapshot(FakeProbe::default());
    assert_eq!(s.heap_init(), "8 MB");
    assert_eq!(s.heap_used(), "1.5 KB");
    assert_eq!(s.heap_committed(), "64 MB");
    assert_eq!(s.heap_max(), "2 GB");
    assert_eq!(s.free_memory(), "512 B");
    assert_eq!(s.max_memory(), "4 GB");
    assert_eq!(s.total_memory(), "1 KB");
}

#[test]
fn used_above_max_is_reported_as_is() {
    let s = snapshot(FakeProbe {
        heap: HeapUsage {
            init: 1024,
            used: 4096,
            committed: 2048,
            max: 1024,
        },
        ..FakeProbe::default()
    });
    assert_eq!(s.heap_used(), "4 KB");
    assert_eq!(s.heap_max(), "1 KB");
}

#[test]
fn missing_byte_counter_renders_not_available() {
    let s = snapshot(FakeProbe {
        heap: HeapUsage::default(),
        ..FakeProbe::default()
    });
    assert_eq!(s.heap_max(), NOT_AVAILABLE);
    assert_eq!(s.heap_used(), NOT_AVAILABLE);
}

#[test]
fn cpu_sentinels_are_passed_through() {
    let s = snapshot(FakeProbe {
        process_cpu_load: UNAVAILABLE,
        system_cpu_load: -1.0,
        load_average: UNAVAILABLE,
        ..FakeProbe::default()
    });
    assert_eq!(s.process_cpu_load(), -1.0);
    assert_eq!(s.system_cpu_load(), -1.0);
    assert_eq!(s.system_load(), -1.0);
}

#[test]
fn os_accessors_return_probe_values() {
    let s = snapshot(FakeProbe::default());
    assert_eq!(s.system_name(), "Linux");
    assert_eq!(s.system_version(), "6.1.0");
    assert_eq!(s.available_processors(), 8);
    assert_eq!(s.process_cpu_load(), 0.25);
    assert_eq!(s.system_cpu_load(), 0.5);
    assert_eq!(s.system_load(), 1.5);
}

#[test]
fn storage_failure_is_isolated_per_root() {
    let s = snapshot(FakeProbe {
        storage: vec![
            (PathBuf::from("/locked"), None),
            (
                PathBuf::from("/data"),
                Some(StorageCapacity {
                    available: 1536,
                    total: 1024 * 1024,
                }),
            ),
        ],
        ..FakeProbe::default()
    });
    let metrics = s.storage_metrics();
    let lines: Vec<&str> = metrics.split(LINE_SEPARATOR).collect();
    assert_eq!(lines.len(), 3, "two lines plus trailing empty: {:?}", lines);
    assert!(lines[0].starts_with("/locked: error querying space: "));
    assert!(lines[0].contains("access denied"));
    assert_eq!(lines[1], "/data: available=1.5 KB, total=1 MB");
    assert_eq!(lines[2], "");
}

#[test]
fn storage_with_no_roots_is_empty() {
    let s = snapshot(FakeProbe {
        storage: vec![],
        ..FakeProbe::default()
    });
    assert_eq!(s.storage_metrics(), "");
}

#[test]
fn input_arguments_are_comma_joined() {
    let s = snapshot(FakeProbe::default());
    assert_eq!(s.input_arguments(), "--verbose, report");

    let empty = snapshot(FakeProbe {
        args: vec![],
        ..FakeProbe::default()
    });
    assert_eq!(empty.input_arguments(), "");
}

#[test]
fn start_time_is_local_calendar_time() {
    let s = snapshot(FakeProbe::default());
    let expected = DateTime::from_timestamp_millis(1_700_000_000_000)
        .unwrap()
        .with_timezone(&Local)
        .format("%a %b %d %H:%M:%S %Z %Y")
        .to_string();
    assert_eq!(s.start_time(), expected);
    assert!(s.start_time().contains("2023"));
}

#[test]
fn start_time_out_of_range_is_not_available() {
    let s = snapshot(FakeProbe {
        start_time_ms: i64::MAX,
        ..FakeProbe::default()
    });
    assert_eq!(s.start_time(), NOT_AVAILABLE);
}

#[test]
fn uptime_decomposes_hours_minutes_seconds_ms() {
    assert_eq!(format_uptime(3_661_004), "1 h 1 min 1 sec 4 ms");
    assert_eq!(format_uptime(500), "0 h 0 min 0 sec 500 ms");
    assert_eq!(format_uptime(0), "0 h 0 min 0 sec 0 ms");
    // Hours do not wrap into days.
    assert_eq!(decompose(90_000_000), (25, 0, 0, 0));
    assert_eq!(decompose(59_999), (0, 0, 59, 999));

    let s = snapshot(FakeProbe::default());
    assert_eq!(s.up_time(), "1 h 1 min 1 sec 4 ms");
}

#[test]
fn runtime_paths_come_from_probe() {
    let s = snapshot(FakeProbe::default());
    assert_eq!(s.runtime_version(), "appmonitor 0.1.0 (x86_64-linux)");
    assert_eq!(s.library_path(), "/usr/lib");
    assert_eq!(s.module_path(), "/usr/bin/appmonitor");
}

#[test]
fn system_properties_keep_platform_order() {
    let s = snapshot(FakeProbe::default());
    let expected = format!("PATH = /usr/bin{sep}HOME = /root{sep}", sep = LINE_SEPARATOR);
    assert_eq!(s.system_properties(), expected);
}

#[test]
fn thread_statuses_list_name_state_and_cpu_time() {
    let s = snapshot(FakeProbe::default());
    let statuses = s.thread_statuses();
    let expected = format!(
        "Thread name =  main{sep}\tstate = RUNNABLE{sep}\tCPU time = 1000 ns{sep}\
         Thread name =  worker{sep}\tstate = WAITING{sep}\tCPU time = 250 ns{sep}",
        sep = LINE_SEPARATOR
    );
    assert_eq!(statuses, expected);
}

#[test]
fn vanished_thread_gets_placeholder_and_count_matches_entries() {
    let mut probe = FakeProbe {
        threads: vec![
            thread(10, "main", ThreadState::Runnable, 5),
            thread(11, "gone", ThreadState::Terminated, 0),
            thread(12, "io", ThreadState::Blocked, 7),
        ],
        ..FakeProbe::default()
    };
    probe.vanished.insert(11);
    let s = snapshot(probe);

    let statuses = s.thread_statuses();
    assert!(statuses.contains("Thread 11: info unavailable"));
    assert!(statuses.contains("Thread name =  main"));
    assert!(statuses.contains("state = BLOCKED"));

    let entries = statuses
        .split(LINE_SEPARATOR)
        .filter(|l| l.starts_with("Thread "))
        .count();
    assert_eq!(s.thread_count(), 3);
    assert_eq!(entries, s.thread_count());
}

#[test]
fn thread_state_letters_map_to_states() {
    assert_eq!(ThreadState::from_proc_letter('R'), ThreadState::Runnable);
    assert_eq!(ThreadState::from_proc_letter('S'), ThreadState::Waiting);
    assert_eq!(ThreadState::from_proc_letter('D'), ThreadState::Blocked);
    assert_eq!(ThreadState::from_proc_letter('Z'), ThreadState::Terminated);
    assert_eq!(ThreadState::TimedWaiting.to_string(), "TIMED_WAITING");
    assert_eq!(ThreadState::New.to_string(), "NEW");
}
