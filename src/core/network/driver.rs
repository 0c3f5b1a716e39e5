//! MonitorDriver - interval loop around the probe engine
//!
//! The driver calls [`HttpMonitor::probe`] once per interval tick, forwards the
//! outcome to the injected [`Reporter`] and owns the failure streak. When the
//! streak reaches its threshold the driver stops probing, emits a final
//! diagnostic and returns [`DriverError::FailureThreshold`].
//!
//! ## Cycle Contract
//!
//! 1. `HttpMonitor::probe(url, retry_count, backoff)` → `ProbeOutcome`
//! 2. Success → `Reporter::success`, streak reset (recovery reported as info)
//! 3. Failure of any kind → `Reporter::error`, streak incremented
//! 4. Streak at threshold → `Reporter::error` final diagnostic, stop
//! 5. Otherwise sleep for the interval and repeat

use crate::config::MonitorConfig;
use crate::core::network::debug_logger::EnhancedDebugLogger;
use crate::core::network::failure_streak::{FailureStreak, StreakState};
use crate::core::network::http_monitor::{HttpMonitor, ProbeObserver, SleepTrait, TokioSleeper};
use crate::core::network::status_renderer::StatusRenderer;
use crate::core::network::types::{ProbeEvent, ProbeOutcome};
use crate::reporter::Reporter;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("{failures} consecutive failed checks for {url}; last error: {last_error}")]
    FailureThreshold {
        url: String,
        failures: u32,
        last_error: String,
    },
}

/// Forwards engine warning signals to the reporter
pub struct ReporterObserver {
    reporter: Arc<dyn Reporter>,
    renderer: StatusRenderer,
}

impl ReporterObserver {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self {
            reporter,
            renderer: StatusRenderer::new(),
        }
    }
}

impl ProbeObserver for ReporterObserver {
    fn on_event(&self, event: &ProbeEvent) {
        self.reporter.warning(&self.renderer.render_event(event));
    }
}

/// Result of one probe cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub outcome: ProbeOutcome,
    pub state: StreakState,
}

/// Settings the driver passes through to the engine unchanged
#[derive(Debug, Clone)]
struct ProbeSettings {
    url: String,
    interval: Duration,
    max_attempts: u32,
    base_backoff: Duration,
}

pub struct MonitorDriver {
    monitor: HttpMonitor,
    reporter: Arc<dyn Reporter>,
    sleeper: Box<dyn SleepTrait>,
    renderer: StatusRenderer,
    debug_logger: EnhancedDebugLogger,
    settings: ProbeSettings,
    streak: FailureStreak,
}

impl MonitorDriver {
    /// Wire `monitor` to report its warning signals through `reporter`
    pub fn new(config: &MonitorConfig, monitor: HttpMonitor, reporter: Arc<dyn Reporter>) -> Self {
        let monitor = monitor.with_observer(Box::new(ReporterObserver::new(reporter.clone())));

        Self {
            monitor,
            reporter,
            sleeper: Box::new(TokioSleeper),
            renderer: StatusRenderer::new(),
            debug_logger: EnhancedDebugLogger::new(),
            settings: ProbeSettings {
                url: config.url.clone(),
                interval: config.interval(),
                max_attempts: config.retry_count,
                base_backoff: config.base_backoff(),
            },
            streak: FailureStreak::with_threshold(config.failure_threshold),
        }
    }

    /// Configure the timer used between cycles (for testing)
    pub fn with_sleeper(mut self, sleeper: Box<dyn SleepTrait>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Configure the debug logger
    pub fn with_debug_logger(mut self, debug_logger: EnhancedDebugLogger) -> Self {
        self.debug_logger = debug_logger;
        self
    }

    pub fn streak(&self) -> &FailureStreak {
        &self.streak
    }

    /// Probe until the failure streak trips
    ///
    /// # Errors
    ///
    /// Returns `DriverError::FailureThreshold` once the threshold is reached;
    /// this is the only way the loop ends.
    pub async fn run(&mut self) -> Result<(), DriverError> {
        self.reporter.info(
            &self
                .renderer
                .render_start(&self.settings.url, self.settings.interval),
        );

        loop {
            let report = self.run_cycle().await;

            if let StreakState::Tripped { count } = report.state {
                self.reporter.error(&self.renderer.render_tripped(
                    &self.settings.url,
                    count,
                    self.streak.threshold(),
                ));
                return Err(DriverError::FailureThreshold {
                    url: self.settings.url.clone(),
                    failures: count,
                    last_error: self
                        .streak
                        .last_error()
                        .map(|e| e.to_string())
                        .unwrap_or_default(),
                });
            }

            self.sleeper.sleep(self.settings.interval).await;
        }
    }

    /// Execute one probe cycle: probe, report, update the streak
    pub async fn run_cycle(&mut self) -> CycleReport {
        let correlation_id = format!("probe_{}", uuid::Uuid::new_v4());
        self.debug_logger.probe_cycle_start(
            &self.settings.url,
            self.settings.max_attempts,
            correlation_id.clone(),
        );

        let outcome = self
            .monitor
            .probe(
                &self.settings.url,
                self.settings.max_attempts,
                self.settings.base_backoff,
            )
            .await;

        self.debug_logger.probe_cycle_end(
            if outcome.is_success() { "success" } else { "failure" },
            (outcome.status_code != 0).then_some(outcome.status_code),
            outcome.attempts,
            outcome.elapsed.as_millis() as u64,
            correlation_id,
        );

        match &outcome.error {
            None => self
                .reporter
                .success(&self.renderer.render_success(&self.settings.url, &outcome)),
            Some(err) => {
                self.debug_logger
                    .error_sync("MonitorDriver", "probe_failed", &err.to_string());
                self.reporter
                    .error(&self.renderer.render_failure(&self.settings.url, &outcome));
            }
        }

        let state = self.streak.record(&outcome);
        match state {
            StreakState::Healthy { recovered_from } if recovered_from > 0 => {
                self.reporter.info(
                    &self
                        .renderer
                        .render_recovery(&self.settings.url, recovered_from),
                );
            }
            StreakState::Failing { count } | StreakState::Tripped { count } => {
                self.debug_logger
                    .streak_update(count, self.streak.threshold());
            }
            StreakState::Healthy { .. } => {}
        }

        CycleReport { outcome, state }
    }
}
