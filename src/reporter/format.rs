// Line formatting for console and file sinks
use ansi_term::Colour;
use chrono::{DateTime, Local};

/// Prefix of every file log line
pub const FILE_PREFIX: &str = "ARGUS: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn colour(&self) -> Colour {
        match self {
            LogLevel::Info => Colour::Blue,
            LogLevel::Success => Colour::Green,
            LogLevel::Warning => Colour::Yellow,
            LogLevel::Error => Colour::Red,
        }
    }

    /// Label padded to 8 columns so messages line up
    pub fn padded(&self) -> String {
        format!("{:<8}", self.label())
    }
}

/// `<yellow timestamp> <colored LEVEL>: message`, timestamp omitted when `None`
pub fn format_console_line(level: LogLevel, message: &str, timestamp: Option<DateTime<Local>>) -> String {
    let level_text = level.colour().paint(level.padded());
    match timestamp {
        Some(ts) => format!(
            "{} {}: {}",
            Colour::Yellow.paint(ts.format("%Y-%m-%d %H:%M:%S").to_string()),
            level_text,
            message
        ),
        None => format!("{}: {}", level_text, message),
    }
}

/// `ARGUS: YYYY/MM/DD HH:MM:SS LEVEL   : message`, never colored
pub fn format_file_line(level: LogLevel, message: &str, timestamp: DateTime<Local>) -> String {
    format!(
        "{}{} {}: {}",
        FILE_PREFIX,
        timestamp.format("%Y/%m/%d %H:%M:%S"),
        level.padded(),
        message
    )
}
