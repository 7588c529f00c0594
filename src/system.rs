//! System-wide readers: OS identity, memory, uptime and process counters.
//!
//! Each reader re-reads its file and falls back to zero or an empty string.

use procfs::FromRead;
use tracing::debug;

use crate::parser;
use crate::processor::CpuTicks;
use crate::source::{self, ProcSource};

const PRETTY_NAME: &str = "PRETTY_NAME";

const MEM_TOTAL: &str = "MemTotal:";
const MEM_FREE: &str = "MemFree:";
const BUFFERS: &str = "Buffers:";
const CACHED: &str = "Cached:";

const PROCESSES: &str = "processes";
const PROCS_RUNNING: &str = "procs_running";

/// Human-readable distribution name from os-release.
pub fn operating_system(source: &ProcSource) -> String {
    source::absorb(source.read_os_release())
        .and_then(|text| parser::assignment_of(&text, PRETTY_NAME))
        .unwrap_or_default()
}

/// Kernel release, the third token of `<proc>/version`
/// (`Linux version 6.5.0-14-generic ...`).
pub fn kernel(source: &ProcSource) -> String {
    source::absorb(source.read_proc(source::VERSION))
        .and_then(|text| text.split_whitespace().nth(2).map(str::to_string))
        .unwrap_or_default()
}

/// Fraction of memory in use, excluding buffers and page cache.
pub fn memory_utilization(source: &ProcSource) -> f64 {
    source::absorb(source.read_proc(source::MEMINFO))
        .map(|text| memory_utilization_from(&text))
        .unwrap_or(0.0)
}

/// `(MemTotal - MemFree - Buffers - Cached) / MemTotal`; 0.0 without a total.
pub fn memory_utilization_from(meminfo: &str) -> f64 {
    let kib = |key: &str| parser::parse_or_default::<f64>(parser::value_of(meminfo, key));
    let total = kib(MEM_TOTAL);
    if total <= 0.0 {
        return 0.0;
    }
    let used = total - kib(MEM_FREE) - kib(BUFFERS) - kib(CACHED);
    (used / total).clamp(0.0, 1.0)
}

/// Seconds since boot, with the fractional part.
pub fn up_time_secs(source: &ProcSource) -> f64 {
    source::absorb(source.read_proc(source::UPTIME))
        .map(|text| up_time_from(&text))
        .unwrap_or(0.0)
}

/// First field of /proc/uptime content; 0.0 if it does not parse.
pub fn up_time_from(uptime: &str) -> f64 {
    match procfs::Uptime::from_read(uptime.as_bytes()) {
        Ok(parsed) => parsed.uptime,
        Err(e) => {
            debug!("Unparseable uptime: {}", e);
            0.0
        }
    }
}

/// Whole seconds since boot.
pub fn up_time(source: &ProcSource) -> u64 {
    up_time_secs(source) as u64
}

/// Processes forked since boot.
pub fn total_processes(source: &ProcSource) -> u64 {
    source.proc_value(source::STAT, PROCESSES).unwrap_or(0)
}

/// Processes currently runnable.
pub fn running_processes(source: &ProcSource) -> u64 {
    source.proc_value(source::STAT, PROCS_RUNNING).unwrap_or(0)
}

/// Live process identifiers, ascending.
pub fn pids(source: &ProcSource) -> Vec<u32> {
    source.pids()
}

/// Everything system-wide that one poll reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemSnapshot {
    pub operating_system: String,
    pub kernel: String,
    pub cpu_utilization: f64,
    /// False on the first poll, whose CPU figure averages since boot.
    pub cpu_primed: bool,
    pub memory_utilization: f64,
    pub up_time_secs: u64,
    pub total_processes: u64,
    pub running_processes: u64,
    pub cpu_ticks: CpuTicks,
}

impl SystemSnapshot {
    /// Reads everything except CPU utilization, which needs the previous
    /// sample and is filled in by the caller's tracker.
    pub fn read(source: &ProcSource) -> Self {
        SystemSnapshot {
            operating_system: operating_system(source),
            kernel: kernel(source),
            cpu_utilization: 0.0,
            cpu_primed: false,
            memory_utilization: memory_utilization(source),
            up_time_secs: up_time(source),
            total_processes: total_processes(source),
            running_processes: running_processes(source),
            cpu_ticks: CpuTicks::read(source),
        }
    }
}
