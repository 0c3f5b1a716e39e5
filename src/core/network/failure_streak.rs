// Consecutive-failure tracking for the monitoring driver

use crate::core::network::types::{ProbeError, ProbeOutcome, DEFAULT_FAILURE_THRESHOLD};

/// Counter of consecutive failed probe cycles
///
/// # Memory-Only Operation
///
/// The streak lives for the lifetime of the process and is never persisted.
/// It is owned and mutated exclusively by the driver; the probe engine never
/// sees it.
///
/// # Thread Safety
///
/// This struct is **not thread-safe**. The driver runs a single logical thread
/// of control, so no synchronization is needed.
#[derive(Debug, Clone)]
pub struct FailureStreak {
    count: u32,
    threshold: u32,
    last_error: Option<ProbeError>,
}

/// State of the streak after recording a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakState {
    /// The cycle succeeded; `recovered_from` is the streak it ended (0 if none)
    Healthy { recovered_from: u32 },
    /// The cycle failed but the threshold is not reached yet
    Failing { count: u32 },
    /// The threshold is reached; probing must stop
    Tripped { count: u32 },
}

impl FailureStreak {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_FAILURE_THRESHOLD)
    }

    /// Threshold is clamped to at least 1
    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold: threshold.max(1),
            last_error: None,
        }
    }

    /// Record the outcome of one engine invocation
    pub fn record(&mut self, outcome: &ProbeOutcome) -> StreakState {
        match &outcome.error {
            None => self.record_success(),
            Some(err) => self.record_failure(err.clone()),
        }
    }

    pub fn record_success(&mut self) -> StreakState {
        let recovered_from = self.count;
        self.count = 0;
        self.last_error = None;
        StreakState::Healthy { recovered_from }
    }

    pub fn record_failure(&mut self, error: ProbeError) -> StreakState {
        self.count = self.count.saturating_add(1);
        self.last_error = Some(error);

        if self.is_tripped() {
            StreakState::Tripped { count: self.count }
        } else {
            StreakState::Failing { count: self.count }
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn is_tripped(&self) -> bool {
        self.count >= self.threshold
    }

    /// Error of the most recent failed cycle in the current streak
    pub fn last_error(&self) -> Option<&ProbeError> {
        self.last_error.as_ref()
    }
}

impl Default for FailureStreak {
    fn default() -> Self {
        Self::new()
    }
}
