// Linux-specific helpers: per-thread name, state and CPU time from /proc/self/task,
// process uptime from /proc/self/stat against /proc/uptime.

use std::io;

use crate::models::{ThreadDetail, ThreadState};

/// Kernel USER_HZ is fixed at 100 for the /proc ABI.
const NANOS_PER_TICK: u64 = 10_000_000;
const MILLIS_PER_TICK: u64 = 10;

/// List thread ids under /proc/self/task (Linux). Empty elsewhere or if unreadable.
pub(super) fn list_thread_ids() -> Vec<u64> {
    #[cfg(target_os = "linux")]
    {
        let Ok(entries) = std::fs::read_dir("/proc/self/task") else {
            return Vec::new();
        };
        let mut tids: Vec<u64> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().to_str()?.parse().ok())
            .collect();
        tids.sort_unstable();
        tids
    }
    #[cfg(not(target_os = "linux"))]
    Vec::new()
}

/// Read name, state and CPU time of one thread (Linux).
/// Fails if the thread exited since it was listed.
pub(super) fn read_thread_detail(tid: u64) -> io::Result<ThreadDetail> {
    #[cfg(target_os = "linux")]
    {
        let dir = format!("/proc/self/task/{}", tid);
        let name = std::fs::read_to_string(format!("{}/comm", dir))?
            .trim_end()
            .to_string();
        let stat = std::fs::read_to_string(format!("{}/stat", dir))?;
        let state = parse_stat_state(&stat)
            .map(ThreadState::from_proc_letter)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "malformed stat"))?;
        let cpu_time_ns = std::fs::read_to_string(format!("{}/schedstat", dir))
            .ok()
            .and_then(|s| parse_schedstat_ns(&s))
            .or_else(|| parse_stat_cpu_ticks(&stat).map(|t| t * NANOS_PER_TICK))
            .unwrap_or(0);
        Ok(ThreadDetail {
            tid,
            name,
            state,
            cpu_time_ns,
        })
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = tid;
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "per-thread introspection requires /proc",
        ))
    }
}

/// Milliseconds since this process started, at clock-tick (10 ms) resolution (Linux).
pub(super) fn process_uptime_ms() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        let stat = std::fs::read_to_string("/proc/self/stat").ok()?;
        let uptime = std::fs::read_to_string("/proc/uptime").ok()?;
        let start_ms = parse_stat_start_ticks(&stat)? * MILLIS_PER_TICK;
        Some(parse_proc_uptime_ms(&uptime)?.saturating_sub(start_ms))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// starttime in clock ticks after boot (field 22 of stat).
fn parse_stat_start_ticks(stat: &str) -> Option<u64> {
    stat_fields(stat)?.get(19)?.parse().ok()
}

/// First field of /proc/uptime ("seconds.hundredths") in milliseconds.
fn parse_proc_uptime_ms(uptime: &str) -> Option<u64> {
    let (secs, frac) = uptime.split_whitespace().next()?.split_once('.')?;
    let secs: u64 = secs.parse().ok()?;
    let hundredths: u64 = frac.get(..2)?.parse().ok()?;
    Some(secs * 1000 + hundredths * MILLIS_PER_TICK)
}

/// Fields after the parenthesised command name; `comm` may itself contain spaces or ')'.
fn stat_fields(stat: &str) -> Option<Vec<&str>> {
    let rest = &stat[stat.rfind(')')? + 1..];
    Some(rest.split_whitespace().collect())
}

fn parse_stat_state(stat: &str) -> Option<char> {
    stat_fields(stat)?.first()?.chars().next()
}

/// utime + stime in clock ticks (fields 14 and 15 of stat).
fn parse_stat_cpu_ticks(stat: &str) -> Option<u64> {
    let fields = stat_fields(stat)?;
    let utime: u64 = fields.get(11)?.parse().ok()?;
    let stime: u64 = fields.get(12)?.parse().ok()?;
    Some(utime + stime)
}

/// First schedstat field: time spent on the CPU in nanoseconds.
fn parse_schedstat_ns(schedstat: &str) -> Option<u64> {
    schedstat.split_whitespace().next()?.parse().ok()
}
