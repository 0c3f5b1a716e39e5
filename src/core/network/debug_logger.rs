use std::collections::HashMap;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use flate2::{write::GzEncoder, Compression};
use fs2::FileExt;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Size at which the active log is archived
const ROTATE_AT_BYTES: u64 = 8 * 1024 * 1024;
/// Gzip archives kept next to the active log
const KEEP_ARCHIVES: usize = 5;
/// The size check runs on the first write and then every N writes
const SIZE_CHECK_EVERY: u32 = 200;

/// Environment variable enabling debug logging
pub const DEBUG_ENV_VAR: &str = "ARGUS_DEBUG";

/// One JSON Lines record
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogEntry {
    /// RFC 3339 local time
    pub timestamp: String,
    /// NETWORK or ERROR
    pub level: String,
    pub component: String,
    pub event: String,
    /// Redacted before it is stored
    pub message: String,
    /// Probe cycle id, or the session id for entries outside a cycle
    pub correlation_id: Option<String>,
    pub fields: HashMap<String, serde_json::Value>,
}

/// Append-only JSON Lines file with size-based gzip archiving
struct DebugLogFile {
    path: PathBuf,
    writes: u32,
}

impl DebugLogFile {
    fn open(path: PathBuf) -> Self {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        Self { path, writes: 0 }
    }

    fn append(&mut self, line: &str) -> io::Result<()> {
        if self.writes % SIZE_CHECK_EVERY == 0 {
            // A failed archive must not cost the entry itself
            let _ = self.archive_if_oversized();
        }
        self.writes = self.writes.wrapping_add(1);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }

    fn is_oversized(&self) -> bool {
        std::fs::metadata(&self.path)
            .map(|meta| meta.len() >= ROTATE_AT_BYTES)
            .unwrap_or(false)
    }

    fn archive_if_oversized(&self) -> io::Result<()> {
        if !self.is_oversized() {
            return Ok(());
        }

        // Another argus process may share the log; whoever holds the lock archives
        let lock_path = self.path.with_extension("lock");
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        if lock.try_lock_exclusive().is_err() {
            return Ok(());
        }

        let result = if self.is_oversized() {
            self.compress_active_log().and_then(|()| self.prune_archives())
        } else {
            Ok(())
        };
        let _ = std::fs::remove_file(&lock_path);
        result
    }

    /// `<dir>/<stem>.` prefix shared by every archive of this log
    fn archive_prefix(&self) -> io::Result<(PathBuf, String)> {
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;
        Ok((dir, format!("{}.", stem)))
    }

    fn compress_active_log(&self) -> io::Result<()> {
        let (dir, prefix) = self.archive_prefix()?;
        let archive = dir.join(format!("{}{}.gz", prefix, Local::now().format("%Y%m%d_%H%M%S")));

        let staged = self.path.with_extension("rotating");
        std::fs::rename(&self.path, &staged)?;

        let mut encoder = GzEncoder::new(File::create(&archive)?, Compression::default());
        io::copy(&mut BufReader::new(File::open(&staged)?), &mut encoder)?;
        encoder.finish()?;

        std::fs::remove_file(&staged)
    }

    fn prune_archives(&self) -> io::Result<()> {
        let (dir, prefix) = self.archive_prefix()?;

        let mut archives = std::fs::read_dir(&dir)?
            .filter_map(Result::ok)
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                name.starts_with(&prefix) && name.ends_with(".gz")
            })
            .filter_map(|entry| {
                let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
                Some((modified, entry.path()))
            })
            .collect::<Vec<_>>();

        // Newest first; everything past the retention count goes
        archives.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, path) in archives.into_iter().skip(KEEP_ARCHIVES) {
            let _ = std::fs::remove_file(path);
        }
        Ok(())
    }
}

/// Opt-in JSON Lines diagnostics for the monitoring driver
pub struct EnhancedDebugLogger {
    enabled: bool,
    log_file: Option<Mutex<DebugLogFile>>,
    session_id: String, // Correlation ID for this process
    redaction_patterns: Vec<(Regex, &'static str)>,
}

impl EnhancedDebugLogger {
    /// Logger configured from `ARGUS_DEBUG`, writing to `~/.argus/argus-debug.log`
    pub fn new() -> Self {
        Self::with_path(Self::get_log_path(), Self::parse_debug_enabled())
    }

    /// Logger writing to an explicit path
    pub fn with_path(log_path: PathBuf, enabled: bool) -> Self {
        let session_id = Uuid::new_v4().to_string()[..8].to_string();

        let log_file = enabled.then(|| Mutex::new(DebugLogFile::open(log_path)));

        Self {
            enabled,
            log_file,
            session_id,
            redaction_patterns: Self::compile_redaction_patterns(),
        }
    }

    /// Parse enabled status from ARGUS_DEBUG
    /// Supports: true/false, 1/0, yes/no, on/off (case insensitive)
    fn parse_debug_enabled() -> bool {
        env::var(DEBUG_ENV_VAR)
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
            .unwrap_or(false)
    }

    pub fn get_log_path() -> PathBuf {
        let mut log_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        log_path.push(".argus");
        log_path.push("argus-debug.log");
        log_path
    }

    fn compile_redaction_patterns() -> Vec<(Regex, &'static str)> {
        [
            (r"(?i)authorization[:\s]+[^\n]+", "[REDACTED]"),
            (r"(?i)bearer[:\s]+[^\s]+", "[REDACTED]"),
            (r"(?i)(token|password|api[_-]?key|secret)[=:\s]+[^\s&]+", "[REDACTED]"),
            // user:password@ inside URLs
            (r"://[^/\s:@]+:[^/\s@]+@", "://[REDACTED]@"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| Some((Regex::new(pattern).ok()?, replacement)))
        .collect()
    }

    /// Mask credentials and tokens before anything reaches disk
    pub fn redact_sensitive_data(&self, text: &str) -> String {
        self.redaction_patterns
            .iter()
            .fold(text.to_string(), |acc, (regex, replacement)| {
                regex.replace_all(&acc, *replacement).into_owned()
            })
    }

    fn log_sync(
        &self,
        level: &str,
        component: &str,
        event: &str,
        message: &str,
        correlation_id: Option<String>,
        fields: HashMap<String, serde_json::Value>,
    ) {
        if !self.enabled {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            level: level.to_string(),
            component: component.to_string(),
            event: event.to_string(),
            message: self.redact_sensitive_data(message),
            correlation_id: correlation_id.or_else(|| Some(self.session_id.clone())),
            fields,
        };

        if let (Some(log_file), Ok(json_line)) = (&self.log_file, serde_json::to_string(&entry)) {
            let mut log_file = log_file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            // Diagnostics never interrupt monitoring
            let _ = log_file.append(&json_line);
        }
    }

    pub fn error_sync(&self, component: &str, event: &str, message: &str) {
        self.log_sync("ERROR", component, event, message, None, HashMap::new());
    }

    // Typed methods for probe cycle events

    pub fn probe_cycle_start(&self, url: &str, max_attempts: u32, correlation_id: String) {
        let mut fields = HashMap::new();
        fields.insert("url".to_string(), serde_json::Value::String(self.redact_sensitive_data(url)));
        fields.insert("max_attempts".to_string(), serde_json::Value::Number(max_attempts.into()));

        self.log_sync("NETWORK", "MonitorDriver", "probe_start",
                     &format!("Starting probe of {}", url),
                     Some(correlation_id), fields);
    }

    pub fn probe_cycle_end(
        &self,
        status: &str,
        http_status: Option<u16>,
        attempts: u32,
        duration_ms: u64,
        correlation_id: String,
    ) {
        let mut fields = HashMap::new();
        fields.insert("status".to_string(), serde_json::Value::String(status.to_string()));
        fields.insert("attempts".to_string(), serde_json::Value::Number(attempts.into()));
        fields.insert("duration_ms".to_string(), serde_json::Value::Number(duration_ms.into()));

        if let Some(code) = http_status {
            fields.insert("http_status".to_string(), serde_json::Value::Number(code.into()));
        }

        self.log_sync("NETWORK", "MonitorDriver", "probe_end",
                     &format!("Probe completed: {} ({}ms)", status, duration_ms),
                     Some(correlation_id), fields);
    }

    pub fn streak_update(&self, count: u32, threshold: u32) {
        let mut fields = HashMap::new();
        fields.insert("count".to_string(), serde_json::Value::Number(count.into()));
        fields.insert("threshold".to_string(), serde_json::Value::Number(threshold.into()));

        self.log_sync("NETWORK", "FailureStreak", "streak_update",
                     &format!("Failure streak: {}/{}", count, threshold),
                     None, fields);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get_session_id(&self) -> &str {
        &self.session_id
    }
}

impl Default for EnhancedDebugLogger {
    fn default() -> Self {
        Self::new()
    }
}
