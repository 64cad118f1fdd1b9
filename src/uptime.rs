// Uptime rendering: "<h> h <m> min <s> sec <ms> ms"

const MS_PER_SECOND: u64 = 1000;
const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;

/// Split total milliseconds into hours, minutes, seconds and milliseconds.
/// Hours are not wrapped into days.
pub fn decompose(uptime_ms: u64) -> (u64, u64, u64, u64) {
    let ms = uptime_ms % MS_PER_SECOND;
    let total_seconds = uptime_ms / MS_PER_SECOND;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    let total_minutes = total_seconds / SECONDS_PER_MINUTE;
    let minutes = total_minutes % MINUTES_PER_HOUR;
    let hours = total_minutes / MINUTES_PER_HOUR;
    (hours, minutes, seconds, ms)
}

pub fn format_uptime(uptime_ms: u64) -> String {
    let (hours, minutes, seconds, ms) = decompose(uptime_ms);
    format!("{} h {} min {} sec {} ms", hours, minutes, seconds, ms)
}
