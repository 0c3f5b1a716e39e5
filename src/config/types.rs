use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid target: {0}")]
    InvalidTarget(#[from] crate::core::network::ProbeError),
    #[error("failure_threshold must be at least 1")]
    ZeroFailureThreshold,
    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// Effective monitor settings
///
/// Values from the TOML file are overridden by command-line flags; fields
/// missing from the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Target URL, must be a fully-qualified HTTPS URL
    pub url: String,
    /// Seconds between probe cycles
    pub interval_secs: u64,
    /// Attempts per probe cycle, 0 means the engine default
    pub retry_count: u32,
    /// Backoff base in seconds; non-positive values are replaced by the engine
    pub backoff_secs: i64,
    /// Consecutive failed cycles before monitoring halts
    pub failure_threshold: u32,
    /// Write to `<log_dir>/argus.log` instead of the console
    pub log_to_file: bool,
    /// Prefix console lines with a timestamp
    pub log_timestamp: bool,
    /// Directory holding the log file
    pub log_dir: PathBuf,
}

impl MonitorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Backoff as passed to the engine; non-positive input maps to zero
    pub fn base_backoff(&self) -> Duration {
        if self.backoff_secs <= 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(self.backoff_secs as u64)
        }
    }
}
