//! A throwaway /proc + /etc layout for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use lpm_stats::ProcSource;
use tempfile::TempDir;

pub const CLOCK_TICKS: u64 = 100;

pub const PASSWD: &str = "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
alice:x:1000:1000:Alice:/home/alice:/bin/zsh
";

pub const OS_RELEASE: &str = "\
NAME=\"Ubuntu\"
VERSION=\"22.04.3 LTS (Jammy Jellyfish)\"
PRETTY_NAME=\"Ubuntu 22.04.3 LTS\"
ID=ubuntu
";

pub struct FakeProc {
    dir: TempDir,
}

/// Ticks and start time written into a fake `<pid>/stat`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PidStat {
    pub utime: u64,
    pub stime: u64,
    pub cutime: u64,
    pub cstime: u64,
    pub start_ticks: u64,
}

impl FakeProc {
    /// An empty tree: no proc files, no os-release, no passwd.
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("proc")).unwrap();
        fs::create_dir_all(dir.path().join("etc")).unwrap();
        FakeProc { dir }
    }

    /// A tree with every system-wide file populated.
    pub fn new() -> Self {
        let fake = FakeProc::empty();
        fake.write_etc("os-release", OS_RELEASE);
        fake.write_etc("passwd", PASSWD);
        fake.write_proc(
            "version",
            "Linux version 6.5.0-14-generic (buildd@lcy02-amd64-110) (gcc 12.3.0) #14-Ubuntu SMP\n",
        );
        fake.write_proc(
            "meminfo",
            "MemTotal:        1000 kB\nMemFree:          500 kB\nMemAvailable:     700 kB\nBuffers:          100 kB\nCached:           100 kB\n",
        );
        fake.set_uptime(1000.42);
        fake.set_cpu(&[600, 0, 300, 900, 0, 0, 100, 0, 0, 0]);
        fake
    }

    pub fn proc_root(&self) -> PathBuf {
        self.dir.path().join("proc")
    }

    pub fn source(&self) -> ProcSource {
        ProcSource::with_paths(
            self.proc_root(),
            self.dir.path().join("etc/os-release"),
            self.dir.path().join("etc/passwd"),
        )
        .with_clock_ticks(CLOCK_TICKS)
    }

    pub fn write_proc(&self, relative: impl AsRef<Path>, content: &str) {
        let path = self.proc_root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn write_etc(&self, name: &str, content: &str) {
        fs::write(self.dir.path().join("etc").join(name), content).unwrap();
    }

    pub fn set_uptime(&self, secs: f64) {
        self.write_proc("uptime", &format!("{:.2} 3600.00\n", secs));
    }

    /// Rewrites `<proc>/stat` with the given aggregate columns.
    pub fn set_cpu(&self, fields: &[u64]) {
        let columns: Vec<String> = fields.iter().map(u64::to_string).collect();
        let content = format!(
            "cpu  {}\ncpu0 {}\nintr 1 2 3\nctxt 1000\nbtime 1700000000\nprocesses 2915\nprocs_running 3\nprocs_blocked 0\n",
            columns.join(" "),
            columns.join(" "),
        );
        self.write_proc("stat", &content);
    }

    pub fn add_process(&self, pid: u32, comm: &str, uid: u32, rss_kib: u64, cmdline: &str, stat: PidStat) {
        self.set_pid_stat(pid, comm, stat);
        self.write_proc(
            format!("{}/status", pid),
            &format!(
                "Name:\t{}\nState:\tS (sleeping)\nPid:\t{}\nUid:\t{}\t{}\t{}\t{}\nVmRSS:\t{:>8} kB\n",
                comm, pid, uid, uid, uid, uid, rss_kib
            ),
        );
        self.write_proc(format!("{}/cmdline", pid), cmdline);
    }

    pub fn set_pid_stat(&self, pid: u32, comm: &str, stat: PidStat) {
        let line = format!(
            "{pid} ({comm}) S 1 {pid} {pid} 0 -1 4194560 100 0 0 0 {} {} {} {} 20 0 1 0 {} 1000000 250 18446744073709551615\n",
            stat.utime, stat.stime, stat.cutime, stat.cstime, stat.start_ticks
        );
        self.write_proc(format!("{}/stat", pid), &line);
    }

    pub fn remove_process(&self, pid: u32) {
        fs::remove_dir_all(self.proc_root().join(pid.to_string())).unwrap();
    }
}
