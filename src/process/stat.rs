//! Column positions in `/proc/<pid>/stat` and the arithmetic built on them.
//!
//! Positions follow proc(5); indices here are 0-based, the man page counts
//! from 1.

/// (14) utime: ticks scheduled in user mode.
pub const UTIME: usize = 13;
/// (15) stime: ticks scheduled in kernel mode.
pub const STIME: usize = 14;
/// (16) cutime: waited-for children's user-mode ticks.
pub const CUTIME: usize = 15;
/// (17) cstime: waited-for children's kernel-mode ticks.
pub const CSTIME: usize = 16;
/// (22) starttime: ticks after boot at which the process started.
pub const STARTTIME: usize = 21;

/// Fewer columns than this and the tick columns are not trusted.
pub const MIN_COLUMNS_FOR_TICKS: usize = 18;
/// Fewer columns than this and there is no start time.
pub const MIN_COLUMNS_FOR_START: usize = STARTTIME + 1;

/// utime + stime + cutime + cstime, or 0 for a short or garbled line.
///
/// The sum saturates at `u64::MAX`.
pub fn active_jiffies(columns: &[&str]) -> u64 {
    if columns.len() < MIN_COLUMNS_FOR_TICKS {
        return 0;
    }
    columns[UTIME..=CSTIME]
        .iter()
        .try_fold(0u64, |acc, c| c.parse::<u64>().ok().map(|v| acc.saturating_add(v)))
        .unwrap_or(0)
}

/// The columns of one stat read that the snapshot needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatSample {
    pub active_jiffies: u64,
    pub start_time: u64,
}

impl StatSample {
    /// Both fields come from the same line; absent columns read as 0.
    pub fn from_columns(columns: &[&str]) -> Self {
        StatSample {
            active_jiffies: active_jiffies(columns),
            start_time: start_time(columns).unwrap_or(0),
        }
    }
}

/// Start time in ticks since boot, if the line is long enough.
pub fn start_time(columns: &[&str]) -> Option<u64> {
    columns.get(STARTTIME)?.parse().ok()
}

/// Seconds the process has been alive.
///
/// Can be zero or negative when the process started within the current
/// tick or the uptime read raced the stat read.
pub fn up_time(system_up_time: f64, start_ticks: u64, clock_ticks: u64) -> f64 {
    system_up_time - start_ticks as f64 / clock_ticks.max(1) as f64
}

/// Average share of one CPU used over the process lifetime.
///
/// Returns 0.0 when `up_time` is not positive.
pub fn cpu_utilization(active_ticks: u64, clock_ticks: u64, up_time: f64) -> f64 {
    if up_time <= 0.0 || !up_time.is_finite() {
        return 0.0;
    }
    (active_ticks as f64 / clock_ticks.max(1) as f64) / up_time
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn seventeen_columns_is_too_short() {
        let owned = columns(17);
        let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
        assert_eq!(active_jiffies(&refs), 0);
    }

    #[test]
    fn eighteen_columns_sum_ticks() {
        let mut owned = columns(18);
        owned[13] = "10".into();
        owned[14] = "20".into();
        owned[15] = "5".into();
        owned[16] = "5".into();
        let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
        assert_eq!(active_jiffies(&refs), 40);
        assert_eq!(start_time(&refs), None);
    }

    #[test]
    fn garbage_tick_column_is_zero() {
        let mut owned = columns(18);
        owned[14] = "??".into();
        let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
        assert_eq!(active_jiffies(&refs), 0);
    }

    #[test]
    fn max_tick_columns_saturate() {
        let mut owned = columns(18);
        owned[13] = u64::MAX.to_string();
        owned[14] = "1".into();
        owned[15] = "0".into();
        owned[16] = "0".into();
        let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
        assert_eq!(active_jiffies(&refs), u64::MAX);
        assert!(cpu_utilization(u64::MAX, 100, 10.0).is_finite());
    }

    #[test]
    fn sample_takes_both_fields_from_one_line() {
        let mut owned = columns(30);
        owned[13] = "10".into();
        owned[14] = "20".into();
        owned[15] = "5".into();
        owned[16] = "5".into();
        let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
        let sample = StatSample::from_columns(&refs);
        assert_eq!(sample, StatSample { active_jiffies: 40, start_time: 21 });
        assert_eq!(StatSample::from_columns(&[]), StatSample::default());
    }

    #[test]
    fn start_time_is_column_22() {
        let owned = columns(30);
        let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
        assert_eq!(start_time(&refs), Some(21));
    }

    #[test]
    fn up_time_subtracts_start() {
        assert_eq!(up_time(1000.0, 50_000, 100), 500.0);
        assert!(up_time(10.0, 5_000, 100) < 0.0);
    }

    #[test]
    fn cpu_utilization_guards_non_positive_up_time() {
        assert_eq!(cpu_utilization(1_000_000, 100, 0.0), 0.0);
        assert_eq!(cpu_utilization(1_000_000, 100, -3.5), 0.0);
        assert_eq!(cpu_utilization(0, 100, -1.0), 0.0);
        assert!((cpu_utilization(5_000, 100, 100.0) - 0.5).abs() < 1e-9);
    }
}
