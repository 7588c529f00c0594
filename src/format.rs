//! Display helpers for durations.

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;

/// Formats seconds as `HH:MM:SS`.
///
/// Hours do not wrap at a day and grow past two digits when needed.
pub fn elapsed_time(seconds: u64) -> String {
    let hours = seconds / SECS_PER_HOUR;
    let minutes = (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = seconds % SECS_PER_MINUTE;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Formats a ratio in `[0, 1]` as a percentage with one decimal.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
