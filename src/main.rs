use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::info;

use lpm_stats::config::Config;
use lpm_stats::format::{elapsed_time, percent};
use lpm_stats::logging::init_tracing;
use lpm_stats::{Manager, ProcSource};

#[derive(Parser, Debug)]
#[command(name = "lpm-stats", version, about = "CPU, memory and process statistics from /proc")]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(short, long, env = "LPM_STATS_CONFIG")]
    config: Option<PathBuf>,

    /// Print a single report and exit
    #[arg(long)]
    once: bool,

    /// Seconds between polls
    #[arg(short, long)]
    interval: Option<u64>,

    /// Number of processes to list
    #[arg(short = 'n', long)]
    top: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    if let Some(secs) = cli.interval {
        config.monitor.interval_secs = secs.max(1);
    }
    if let Some(n) = cli.top {
        config.monitor.top_n = n;
    }

    init_tracing(&config.logging);
    info!("Reading statistics from {:?}", config.paths.proc_root);

    let source = ProcSource::from_config(&config.paths);
    info!("Clock ticks per second: {}", source.clock_ticks());
    let mut manager = Manager::new(source);

    if cli.once {
        // The first CPU sample averages since boot; wait one interval for a real rate.
        thread::sleep(Duration::from_secs(config.monitor.interval_secs));
        manager.refresh();
        print_report(&manager, config.monitor.top_n);
        return Ok(());
    }

    loop {
        print_report(&manager, config.monitor.top_n);
        thread::sleep(Duration::from_secs(config.monitor.interval_secs));
        manager.refresh();
    }
}

fn print_report(manager: &Manager, top_n: usize) {
    let system = manager.system();
    let cpu = if system.cpu_primed {
        percent(system.cpu_utilization)
    } else {
        "warming up".to_string()
    };

    println!("OS:        {}", system.operating_system);
    println!("Kernel:    {}", system.kernel);
    println!("CPU:       {}", cpu);
    println!("Memory:    {}", percent(system.memory_utilization));
    println!(
        "Processes: {} total, {} running",
        system.total_processes, system.running_processes
    );
    println!("Up time:   {}", elapsed_time(system.up_time_secs));
    println!();
    println!(
        "{:>7}  {:<12} {:>6} {:>8} {:>10}  COMMAND",
        "PID", "USER", "CPU", "RAM[MB]", "TIME+"
    );
    for p in manager.top(top_n) {
        println!(
            "{:>7}  {:<12} {:>6} {:>8} {:>10}  {}",
            p.pid,
            truncate(&p.user, 12),
            percent(p.cpu_utilization),
            p.ram_mib,
            elapsed_time(p.up_time_secs),
            truncate(&p.command, 60)
        );
    }
    println!();
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
