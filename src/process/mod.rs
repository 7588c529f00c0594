use tracing::debug;

use crate::error::SourceError;
use crate::parser;
use crate::source::{self, ProcSource};
use crate::system;
use crate::user;

pub mod rank;
pub mod stat;

pub use rank::{CpuRanked, busiest_first, rank_by_cpu};

const KIB_PER_MIB: u64 = 1024;

// Keys in /proc/<pid>/status.
const VM_RSS: &str = "VmRSS:";
const UID: &str = "Uid:";

/// A live handle on one process.
///
/// Nothing is cached: every accessor re-reads /proc, since the process may
/// have changed or exited since the last call. Exited processes read as
/// zeros and empty strings.
#[derive(Debug, Clone, Copy)]
pub struct Process<'a> {
    pid: u32,
    source: &'a ProcSource,
}

/// Attributes of one process captured at a single instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub user: String,
    pub command: String,
    pub ram_mib: u64,
    pub start_time_ticks: u64,
    pub up_time_secs: u64,
    pub cpu_utilization: f64,
}

impl<'a> Process<'a> {
    pub fn new(pid: u32, source: &'a ProcSource) -> Self {
        Process { pid, source }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Reads the stat line, provided it has at least `min_columns` columns.
    fn stat_line(&self, min_columns: usize) -> Option<String> {
        let line = source::absorb(self.source.read_pid(self.pid, source::PID_STAT))?;
        let columns = parser::stat_tokens(&line).len();
        if columns < min_columns {
            let e = SourceError::Malformed {
                path: self.source.pid_dir(self.pid).join(source::PID_STAT),
                reason: format!("{} columns, expected at least {}", columns, min_columns),
            };
            debug!("{}", e);
            return None;
        }
        Some(line)
    }

    /// Both tick-derived columns from a single read of the stat line.
    fn stat_sample(&self) -> stat::StatSample {
        self.stat_line(stat::MIN_COLUMNS_FOR_TICKS)
            .map(|line| stat::StatSample::from_columns(&parser::stat_tokens(&line)))
            .unwrap_or_default()
    }

    /// Ticks spent on CPU by the process and its reaped children.
    pub fn active_jiffies(&self) -> u64 {
        self.stat_line(stat::MIN_COLUMNS_FOR_TICKS)
            .map(|line| stat::active_jiffies(&parser::stat_tokens(&line)))
            .unwrap_or(0)
    }

    /// Start time in ticks since boot; 0 if unreadable.
    pub fn start_time(&self) -> u64 {
        self.stat_line(stat::MIN_COLUMNS_FOR_START)
            .and_then(|line| stat::start_time(&parser::stat_tokens(&line)))
            .unwrap_or(0)
    }

    /// Seconds since the process started, unclamped.
    pub fn up_time_secs(&self) -> f64 {
        stat::up_time(
            system::up_time_secs(self.source),
            self.start_time(),
            self.source.clock_ticks(),
        )
    }

    /// Whole seconds since the process started, never negative.
    pub fn up_time(&self) -> u64 {
        self.up_time_secs().max(0.0) as u64
    }

    /// Average CPU share over the process lifetime; 0.0 for a process with
    /// no measurable lifetime.
    pub fn cpu_utilization(&self) -> f64 {
        stat::cpu_utilization(
            self.active_jiffies(),
            self.source.clock_ticks(),
            self.up_time_secs(),
        )
    }

    /// Command line with NUL separators turned into spaces.
    pub fn command(&self) -> String {
        source::absorb(self.source.read_pid(self.pid, source::PID_CMDLINE))
            .map(|raw| raw.replace('\0', " ").trim().to_string())
            .unwrap_or_default()
    }

    /// Resident set size in whole MiB (truncated).
    pub fn ram(&self) -> u64 {
        self.source
            .pid_value::<u64>(self.pid, source::PID_STATUS, VM_RSS)
            .map(|kib| kib / KIB_PER_MIB)
            .unwrap_or(0)
    }

    /// Real uid of the process owner.
    pub fn uid(&self) -> Option<u32> {
        self.source.pid_value(self.pid, source::PID_STATUS, UID)
    }

    /// Name of the owning user; empty if the uid has no passwd entry.
    pub fn user(&self) -> String {
        self.uid()
            .and_then(|uid| user::lookup(self.source, uid))
            .map(|u| u.name)
            .unwrap_or_default()
    }

    /// Captures every attribute, reading system uptime and passwd itself.
    pub fn snapshot(&self) -> ProcessSnapshot {
        let passwd = source::absorb(self.source.read_passwd());
        self.snapshot_at(system::up_time_secs(self.source), passwd.as_deref())
    }

    /// Captures every attribute against an uptime and passwd the caller
    /// already read, so a whole poll shares them.
    ///
    /// The stat, status and cmdline files are each read once. If stat is
    /// gone, every tick-derived field falls back together.
    pub fn snapshot_at(&self, system_up_time: f64, passwd: Option<&str>) -> ProcessSnapshot {
        let clock_ticks = self.source.clock_ticks();
        let sample = self.stat_sample();
        let up_time_secs = stat::up_time(system_up_time, sample.start_time, clock_ticks);

        let status = source::absorb(self.source.read_pid(self.pid, source::PID_STATUS));
        let status = status.as_deref().unwrap_or_default();
        let ram_mib = parser::parse_or_default::<u64>(parser::value_of(status, VM_RSS)) / KIB_PER_MIB;
        let user = parser::value_of(status, UID)
            .and_then(|uid| uid.parse::<u32>().ok())
            .and_then(|uid| passwd.and_then(|text| user::find_in_passwd(text, uid)))
            .map(|u| u.name)
            .unwrap_or_default();

        ProcessSnapshot {
            pid: self.pid,
            user,
            command: self.command(),
            ram_mib,
            start_time_ticks: sample.start_time,
            up_time_secs: up_time_secs.max(0.0) as u64,
            cpu_utilization: stat::cpu_utilization(sample.active_jiffies, clock_ticks, up_time_secs),
        }
    }
}
