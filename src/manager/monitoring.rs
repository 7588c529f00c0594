use tracing::debug;

use crate::process::{self, Process, ProcessSnapshot};
use crate::processor::{Processor, UtilizationSample};
use crate::source::{self, ProcSource};
use crate::system::{self, SystemSnapshot};

// Reads the system-wide counters and folds the CPU sample into the tracker.
pub fn refresh_system(source: &ProcSource, processor: &mut Processor) -> SystemSnapshot {
    let mut system = SystemSnapshot::read(source);
    system.cpu_primed = processor.is_primed();
    system.cpu_utilization = processor.update(UtilizationSample::from(&system.cpu_ticks));
    system
}

// Snapshots every live process and returns them busiest first.
// Processes that exit mid-read still appear, with zeroed attributes.
// Uptime and passwd are read once and shared by every snapshot.
pub fn refresh_processes(source: &ProcSource) -> Vec<ProcessSnapshot> {
    let pids = system::pids(source);
    let up_time = system::up_time_secs(source);
    let passwd = source::absorb(source.read_passwd());
    let mut snapshots: Vec<ProcessSnapshot> = pids
        .iter()
        .map(|&pid| Process::new(pid, source).snapshot_at(up_time, passwd.as_deref()))
        .collect();

    process::rank_by_cpu(&mut snapshots);
    debug!("Loaded {} processes", snapshots.len());
    snapshots
}
