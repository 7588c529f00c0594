use crate::parser;
use crate::source::{self, ProcSource};

// Column positions on the aggregate `cpu` line of /proc/stat, after the label.
pub const USER: usize = 0;
pub const NICE: usize = 1;
pub const SYSTEM: usize = 2;
pub const IDLE: usize = 3;
pub const IOWAIT: usize = 4;
pub const IRQ: usize = 5;
pub const SOFTIRQ: usize = 6;
pub const STEAL: usize = 7;
pub const GUEST: usize = 8;
pub const GUEST_NICE: usize = 9;

/// Label of the aggregate line (per-core lines are `cpu0`, `cpu1`, ...).
pub const AGGREGATE_LABEL: &str = "cpu";

/// Cumulative CPU time counters since boot, in jiffies, in kernel column order.
///
/// An empty sequence means the statistics could not be read. Older kernels
/// report fewer than ten columns; missing columns read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuTicks(Vec<u64>);

impl CpuTicks {
    pub fn new(fields: Vec<u64>) -> Self {
        CpuTicks(fields)
    }

    /// Reads the aggregate line from `<proc>/stat`.
    pub fn read(source: &ProcSource) -> Self {
        source::absorb(source.read_proc(source::STAT))
            .map(|text| Self::parse(&text))
            .unwrap_or_default()
    }

    /// Parses the aggregate `cpu` line out of /proc/stat content.
    ///
    /// A line with any non-numeric column is treated as unreadable.
    pub fn parse(stat: &str) -> Self {
        parser::values_of(stat, AGGREGATE_LABEL)
            .and_then(parser::parse_all_u64)
            .map(CpuTicks)
            .unwrap_or_default()
    }

    pub fn fields(&self) -> &[u64] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, index: usize) -> u64 {
        self.0.get(index).copied().unwrap_or(0)
    }

    /// Total jiffies: the sum of every column, saturating at `u64::MAX`.
    pub fn jiffies(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &v| acc.saturating_add(v))
    }

    /// Idle jiffies: `idle + iowait`, or 0 if either column is absent.
    pub fn idle_jiffies(&self) -> u64 {
        if self.0.len() <= IOWAIT {
            return 0;
        }
        self.0[IDLE].saturating_add(self.0[IOWAIT])
    }

    /// Jiffies spent doing work.
    pub fn active_jiffies(&self) -> u64 {
        self.jiffies().saturating_sub(self.idle_jiffies())
    }

    pub fn user(&self) -> u64 {
        self.field(USER)
    }

    pub fn nice(&self) -> u64 {
        self.field(NICE)
    }

    pub fn system(&self) -> u64 {
        self.field(SYSTEM)
    }

    pub fn idle(&self) -> u64 {
        self.field(IDLE)
    }

    pub fn iowait(&self) -> u64 {
        self.field(IOWAIT)
    }

    pub fn irq(&self) -> u64 {
        self.field(IRQ)
    }

    pub fn softirq(&self) -> u64 {
        self.field(SOFTIRQ)
    }

    pub fn steal(&self) -> u64 {
        self.field(STEAL)
    }

    pub fn guest(&self) -> u64 {
        self.field(GUEST)
    }

    pub fn guest_nice(&self) -> u64 {
        self.field(GUEST_NICE)
    }
}
