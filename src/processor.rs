//! System-wide CPU utilization from successive /proc/stat samples.

use tracing::trace;

use crate::source::ProcSource;

pub mod ticks;

pub use ticks::CpuTicks;

/// One poll of the aggregate CPU counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtilizationSample {
    pub total: u64,
    pub idle: u64,
}

impl From<&CpuTicks> for UtilizationSample {
    fn from(ticks: &CpuTicks) -> Self {
        UtilizationSample {
            total: ticks.jiffies(),
            idle: ticks.idle_jiffies(),
        }
    }
}

/// Tracks the previous sample so each poll can report a rate.
///
/// The counters are cumulative since boot, so the first call measures
/// against zero and reports the average since boot rather than current
/// load. Callers that care should discard it (see `is_primed`).
///
/// One tracker belongs to one polling loop; `utilization` takes `&mut self`.
#[derive(Debug, Default)]
pub struct Processor {
    previous_total: u64,
    previous_idle: u64,
    primed: bool,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads /proc/stat and returns the busy fraction since the last call.
    pub fn utilization(&mut self, source: &ProcSource) -> f64 {
        let ticks = CpuTicks::read(source);
        self.update(UtilizationSample::from(&ticks))
    }

    /// Folds in a new sample and returns the busy fraction in `[0, 1]`.
    ///
    /// The stored sample is replaced even when the result is degenerate. A
    /// zero total delta (no time passed, or nothing readable on either
    /// poll) yields 0.0. Counters that went backwards are treated as no change.
    pub fn update(&mut self, sample: UtilizationSample) -> f64 {
        let delta_total = sample.total.saturating_sub(self.previous_total);
        let delta_idle = sample.idle.saturating_sub(self.previous_idle);

        self.previous_total = sample.total;
        self.previous_idle = sample.idle;
        self.primed = true;

        trace!(delta_total, delta_idle, "cpu sample");

        if delta_total == 0 {
            return 0.0;
        }
        let busy = delta_total.saturating_sub(delta_idle);
        (busy as f64 / delta_total as f64).clamp(0.0, 1.0)
    }

    /// Whether at least one sample has been taken.
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    pub fn previous(&self) -> UtilizationSample {
        UtilizationSample {
            total: self.previous_total,
            idle: self.previous_idle,
        }
    }
}
