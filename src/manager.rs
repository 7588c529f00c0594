use crate::process::ProcessSnapshot;
use crate::processor::Processor;
use crate::source::ProcSource;
use crate::system::SystemSnapshot;

pub mod monitoring;

/// Owns the data source and the one CPU tracker for a polling loop.
///
/// Polls take `&mut self`, so the tracker cannot be driven from two places.
#[derive(Debug)]
pub struct Manager {
    source: ProcSource,
    processor: Processor,
    system: SystemSnapshot,
    processes: Vec<ProcessSnapshot>,
}

impl Manager {
    /// Creates the manager and takes the initial snapshot.
    ///
    /// The CPU figure of that snapshot averages since boot.
    pub fn new(source: ProcSource) -> Self {
        let mut manager = Manager {
            source,
            processor: Processor::new(),
            system: SystemSnapshot::default(),
            processes: Vec::new(),
        };
        manager.refresh();
        manager
    }

    // Deals with live data from the Linux system
    pub fn refresh(&mut self) {
        self.system = monitoring::refresh_system(&self.source, &mut self.processor);
        self.processes = monitoring::refresh_processes(&self.source);
    }

    pub fn source(&self) -> &ProcSource {
        &self.source
    }

    pub fn system(&self) -> &SystemSnapshot {
        &self.system
    }

    /// All processes from the last refresh, busiest first.
    pub fn processes(&self) -> &[ProcessSnapshot] {
        &self.processes
    }

    /// The `n` busiest processes from the last refresh.
    pub fn top(&self, n: usize) -> &[ProcessSnapshot] {
        &self.processes[..n.min(self.processes.len())]
    }
}
