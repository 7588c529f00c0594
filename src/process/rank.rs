//! Ordering of processes by CPU utilization, busiest first.

use std::cmp::Ordering;

use super::{Process, ProcessSnapshot};

/// Anything that can report a CPU utilization ratio for ranking.
pub trait CpuRanked {
    fn cpu_utilization(&self) -> f64;
}

impl CpuRanked for Process<'_> {
    /// Re-reads /proc on every call.
    fn cpu_utilization(&self) -> f64 {
        Process::cpu_utilization(self)
    }
}

impl CpuRanked for ProcessSnapshot {
    fn cpu_utilization(&self) -> f64 {
        self.cpu_utilization
    }
}

/// Total order, higher utilization first. Equal values compare `Equal`.
pub fn busiest_first<T: CpuRanked>(a: &T, b: &T) -> Ordering {
    b.cpu_utilization().total_cmp(&a.cpu_utilization())
}

/// Sorts busiest first, keeping the relative order of ties.
///
/// Live `Process` handles re-read their stats on every comparison, so a
/// process that changes mid-sort can leave the result only roughly ordered.
/// Rank `ProcessSnapshot`s when the order has to be exact.
pub fn rank_by_cpu<T: CpuRanked>(items: &mut [T]) {
    items.sort_by(busiest_first);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pid: u32, cpu: f64) -> ProcessSnapshot {
        ProcessSnapshot {
            pid,
            cpu_utilization: cpu,
            ..ProcessSnapshot::default()
        }
    }

    #[test]
    fn sorts_descending() {
        let mut procs = vec![snapshot(1, 0.1), snapshot(2, 0.9), snapshot(3, 0.5)];
        rank_by_cpu(&mut procs);
        let order: Vec<f64> = procs.iter().map(|p| p.cpu_utilization).collect();
        assert_eq!(order, vec![0.9, 0.5, 0.1]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut procs = vec![snapshot(7, 0.2), snapshot(3, 0.4), snapshot(5, 0.2)];
        rank_by_cpu(&mut procs);
        let pids: Vec<u32> = procs.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![3, 7, 5]);
    }

    #[test]
    fn comparator_is_descending() {
        let low = snapshot(1, 0.1);
        let high = snapshot(2, 0.7);
        assert_eq!(busiest_first(&high, &low), Ordering::Less);
        assert_eq!(busiest_first(&low, &high), Ordering::Greater);
        assert_eq!(busiest_first(&low, &low), Ordering::Equal);
    }
}
