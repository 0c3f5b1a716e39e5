pub mod debug_logger;
pub mod driver;
pub mod failure_streak;
pub mod http_monitor;
pub mod status_renderer;
pub mod target;
pub mod types;

// Re-export commonly used items
pub use debug_logger::EnhancedDebugLogger;
pub use driver::{CycleReport, DriverError, MonitorDriver, ReporterObserver};
pub use failure_streak::{FailureStreak, StreakState};
pub use http_monitor::{ClockTrait, HttpClientTrait, HttpMonitor, ProbeObserver, SleepTrait};
pub use status_renderer::StatusRenderer;
pub use target::Target;
pub use types::*;
