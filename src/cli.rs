use crate::config::MonitorConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "argus")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Continuous HTTPS uptime monitor with bounded retries")]
pub struct Cli {
    /// The URL to monitor (must be https)
    #[arg(long)]
    pub url: Option<String>,

    /// The monitoring interval in seconds
    #[arg(short = 'i', long)]
    pub interval: Option<u64>,

    /// Attempts per check; 0 selects the default of 3
    #[arg(long = "retry-count")]
    pub retry_count: Option<u32>,

    /// Backoff base in seconds between retries; non-positive enforces 3 seconds
    #[arg(long = "backoff-duration", allow_negative_numbers = true)]
    pub backoff_duration: Option<i64>,

    /// Consecutive failed checks before monitoring stops
    #[arg(long = "failure-threshold")]
    pub failure_threshold: Option<u32>,

    /// Log to <log-dir>/argus.log instead of the console
    #[arg(long = "log-to-file")]
    pub log_to_file: bool,

    /// Prefix console output with timestamps
    #[arg(long = "log-timestamp", value_name = "BOOL")]
    pub log_timestamp: Option<bool>,

    /// Directory for the log file
    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,

    /// Config file path (defaults to ~/.argus/config.toml)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    pub init: bool,

    /// Print the effective configuration and exit
    #[arg(short = 'p', long)]
    pub print: bool,

    /// Validate the effective configuration and exit
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Overlay flags that were given on top of `config`
    pub fn apply(&self, mut config: MonitorConfig) -> MonitorConfig {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(interval) = self.interval {
            config.interval_secs = interval;
        }
        if let Some(retry_count) = self.retry_count {
            config.retry_count = retry_count;
        }
        if let Some(backoff) = self.backoff_duration {
            config.backoff_secs = backoff;
        }
        if let Some(threshold) = self.failure_threshold {
            config.failure_threshold = threshold;
        }
        if self.log_to_file {
            config.log_to_file = true;
        }
        if let Some(show) = self.log_timestamp {
            config.log_timestamp = show;
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
        config
    }
}
