//! User-facing log sink
//!
//! The driver reports every probe cycle through the [`Reporter`] trait. The
//! stock [`LogReporter`] writes colored lines to the console or plain lines to
//! `<log_dir>/argus.log`.

pub mod format;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub use format::{format_console_line, format_file_line, LogLevel};

/// Name of the log file created inside the log directory
pub const LOG_FILE_NAME: &str = "argus.log";

/// Sink for the four message kinds the driver emits
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

enum Sink {
    Console { show_timestamp: bool },
    File { file: Mutex<File>, path: PathBuf },
}

/// Console or file reporter
pub struct LogReporter {
    sink: Sink,
}

impl LogReporter {
    /// Colored console output, optionally prefixed with a timestamp
    pub fn console(show_timestamp: bool) -> Self {
        Self {
            sink: Sink::Console { show_timestamp },
        }
    }

    /// Append to `<log_dir>/argus.log`, creating the directory if needed
    pub fn file(log_dir: &Path) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(log_dir)?;
        let path = log_dir.join(LOG_FILE_NAME);

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let file = options.open(&path)?;

        Ok(Self {
            sink: Sink::File {
                file: Mutex::new(file),
                path,
            },
        })
    }

    /// Log file path when writing to a file
    pub fn log_path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::Console { .. } => None,
            Sink::File { path, .. } => Some(path),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        let now = chrono::Local::now();
        match &self.sink {
            Sink::Console { show_timestamp } => {
                let line = format_console_line(level, message, show_timestamp.then_some(now));
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                // A closed stdout leaves nothing to report to
                let _ = writeln!(handle, "{}", line);
            }
            Sink::File { file, .. } => {
                let line = format_file_line(level, message, now);
                // A panicked writer leaves the file handle itself intact
                let mut file = file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                if writeln!(file, "{}", line).is_err() {
                    eprintln!("{}", line);
                }
            }
        }
    }
}

impl Reporter for LogReporter {
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn success(&self, message: &str) {
        self.log(LogLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}
