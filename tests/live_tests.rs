//! Smoke tests against the real /proc of the test process.

use lpm_stats::{Manager, ProcSource, Process, system};

#[test]
fn test_pids_include_current_process() {
    let source = ProcSource::new();
    let current_pid = std::process::id();
    assert!(source.pids().contains(&current_pid), "Current process should be in the list");
}

#[test]
fn test_current_process_has_command_and_ticks_per_second() {
    let source = ProcSource::new();
    assert!(source.clock_ticks() > 0);
    let process = Process::new(std::process::id(), &source);
    assert!(!process.command().is_empty());
    assert!(process.cpu_utilization() >= 0.0);
    assert!(process.uid().is_some());
}

#[test]
fn test_system_uptime_is_positive() {
    let source = ProcSource::new();
    assert!(system::up_time_secs(&source) > 0.0);
    let ticks = lpm_stats::CpuTicks::read(&source);
    assert!(ticks.jiffies() > 0);
    assert!(ticks.jiffies() >= ticks.idle_jiffies());
}

#[test]
fn test_invalid_pid_reads_as_zeros() {
    let source = ProcSource::new();
    let process = Process::new(999_999_999, &source);
    assert_eq!(process.active_jiffies(), 0);
    assert_eq!(process.command(), "");
    assert_eq!(process.ram(), 0);
    assert_eq!(process.cpu_utilization(), 0.0);
}

#[test]
fn test_manager_sees_current_process() {
    let manager = Manager::new(ProcSource::new());
    let current_pid = std::process::id();
    assert!(manager.processes().iter().any(|p| p.pid == current_pid));
    let utilization = manager.system().cpu_utilization;
    assert!((0.0..=1.0).contains(&utilization));
}
