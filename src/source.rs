//! Access to the kernel interface files the collectors read.
//!
//! A `ProcSource` never fails loudly: every read returns a `Result` that the
//! public readers fold into a zero or empty default, because any process can
//! exit between being listed and being read.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use nix::unistd::{SysconfVar, sysconf};
use tracing::{debug, warn};

use crate::config::PathsConfig;
use crate::error::SourceError;
use crate::parser;

pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_OS_RELEASE: &str = "/etc/os-release";
pub const DEFAULT_PASSWD: &str = "/etc/passwd";

/// Used only when the runtime refuses to report `_SC_CLK_TCK`.
pub const FALLBACK_CLOCK_TICKS: u64 = 100;

// File names below the proc root.
pub const STAT: &str = "stat";
pub const UPTIME: &str = "uptime";
pub const MEMINFO: &str = "meminfo";
pub const VERSION: &str = "version";
pub const PID_STAT: &str = "stat";
pub const PID_STATUS: &str = "status";
pub const PID_CMDLINE: &str = "cmdline";

#[derive(Debug, Clone)]
pub struct ProcSource {
    proc_root: PathBuf,
    os_release: PathBuf,
    passwd: PathBuf,
    clock_ticks: u64,
}

impl ProcSource {
    /// Reads the live system with the runtime's clock-tick frequency.
    pub fn new() -> Self {
        Self::with_paths(DEFAULT_PROC_ROOT, DEFAULT_OS_RELEASE, DEFAULT_PASSWD)
    }

    pub fn with_paths(
        proc_root: impl Into<PathBuf>,
        os_release: impl Into<PathBuf>,
        passwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            proc_root: proc_root.into(),
            os_release: os_release.into(),
            passwd: passwd.into(),
            clock_ticks: query_clock_ticks(),
        }
    }

    pub fn from_config(paths: &PathsConfig) -> Self {
        Self::with_paths(&paths.proc_root, &paths.os_release, &paths.passwd)
    }

    /// Overrides the clock-tick frequency, for fixtures recorded elsewhere.
    pub fn with_clock_ticks(mut self, clock_ticks: u64) -> Self {
        self.clock_ticks = clock_ticks.max(1);
        self
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    /// Clock ticks (jiffies) per second; never zero.
    pub fn clock_ticks(&self) -> u64 {
        self.clock_ticks
    }

    /// Reads a file below the proc root, e.g. `"meminfo"` or `"42/stat"`.
    pub fn read_proc(&self, relative: impl AsRef<Path>) -> Result<String, SourceError> {
        read_file(&self.proc_root.join(relative))
    }

    /// Reads a per-process file, e.g. `read_pid(42, "status")`.
    pub fn read_pid(&self, pid: u32, name: &str) -> Result<String, SourceError> {
        read_file(&self.pid_dir(pid).join(name))
    }

    pub fn read_os_release(&self) -> Result<String, SourceError> {
        read_file(&self.os_release)
    }

    pub fn read_passwd(&self) -> Result<String, SourceError> {
        read_file(&self.passwd)
    }

    /// Value following `key` in a file below the proc root, parsed as `T`.
    pub fn proc_value<T: FromStr>(&self, file: &str, key: &str) -> Option<T> {
        let text = absorb(self.read_proc(file))?;
        parser::value_of(&text, key)?.parse().ok()
    }

    /// Value following `key` in a per-process file, parsed as `T`.
    pub fn pid_value<T: FromStr>(&self, pid: u32, file: &str, key: &str) -> Option<T> {
        let text = absorb(self.read_pid(pid, file))?;
        parser::value_of(&text, key)?.parse().ok()
    }

    pub fn pid_dir(&self, pid: u32) -> PathBuf {
        self.proc_root.join(pid.to_string())
    }

    /// Identifiers of every live process, ascending.
    ///
    /// Only purely numeric directory names below the proc root are returned.
    pub fn pids(&self) -> Vec<u32> {
        let iter = match procfs::process::all_processes_with_root(&self.proc_root) {
            Ok(iter) => iter,
            Err(e) => {
                warn!("Failed to read process list under {:?}: {}", self.proc_root, e);
                return Vec::new();
            }
        };

        let mut pids: Vec<u32> = iter
            .filter_map(|p| p.ok()) // Skip entries that vanished while listing
            .filter_map(|p| u32::try_from(p.pid).ok())
            .collect();
        pids.sort_unstable();
        pids
    }
}

impl Default for ProcSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds a read failure into `None`, logging it.
///
/// Every public reader goes through here, so a missing or unreadable file is
/// never more than a debug line.
pub fn absorb(read: Result<String, SourceError>) -> Option<String> {
    match read {
        Ok(text) => Some(text),
        Err(e) => {
            debug!("{}", e);
            None
        }
    }
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Clock ticks per second as reported by `sysconf(_SC_CLK_TCK)`.
pub fn query_clock_ticks() -> u64 {
    match sysconf(SysconfVar::CLK_TCK) {
        Ok(Some(hz)) if hz > 0 => hz as u64,
        Ok(_) => {
            warn!("_SC_CLK_TCK unavailable, assuming {} Hz", FALLBACK_CLOCK_TICKS);
            FALLBACK_CLOCK_TICKS
        }
        Err(e) => {
            warn!("sysconf(_SC_CLK_TCK) failed: {}, assuming {} Hz", e, FALLBACK_CLOCK_TICKS);
            FALLBACK_CLOCK_TICKS
        }
    }
}
