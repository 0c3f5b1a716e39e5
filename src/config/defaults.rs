// Built-in defaults, applied when neither the config file nor a flag sets a value

use super::types::MonitorConfig;
use crate::core::network::types::{DEFAULT_FAILURE_THRESHOLD, DEFAULT_MAX_ATTEMPTS};
use std::path::PathBuf;

pub const DEFAULT_URL: &str = "https://example.com";
pub const DEFAULT_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_BACKOFF_SECS: i64 = 2;
pub const DEFAULT_LOG_DIR: &str = "./output";

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            url: DEFAULT_URL.to_string(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            retry_count: DEFAULT_MAX_ATTEMPTS,
            backoff_secs: DEFAULT_BACKOFF_SECS,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            log_to_file: false,
            log_timestamp: true,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}
