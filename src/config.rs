//! Configuration management (TOML)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::source::{DEFAULT_OS_RELEASE, DEFAULT_PASSWD, DEFAULT_PROC_ROOT};

/// Overrides `monitor.interval_secs` when set to a positive integer.
pub const INTERVAL_ENV: &str = "LPM_STATS_INTERVAL_SECS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub monitor: MonitorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub proc_root: PathBuf,
    pub os_release: PathBuf,
    pub passwd: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub interval_secs: u64,
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            os_release: PathBuf::from(DEFAULT_OS_RELEASE),
            passwd: PathBuf::from(DEFAULT_PASSWD),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            interval_secs: 1,
            top_n: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "warn,lpm_stats=info".to_string(),
            json: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise, then applies
    /// environment overrides.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Config::load(path)?
        } else {
            Config::default()
        };
        config.apply_env();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, content).map_err(write_err)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "monitor.interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn apply_env(&mut self) {
        self.apply_interval_override(env::var(INTERVAL_ENV).ok().as_deref());
    }

    fn apply_interval_override(&mut self, value: Option<&str>) {
        if let Some(n) = value.and_then(|v| v.trim().parse::<u64>().ok()) {
            if n > 0 {
                self.monitor.interval_secs = n;
            }
        }
    }

    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "lpm-stats")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
