// Message rendering for reporter output
use crate::core::network::types::{ProbeEvent, ProbeOutcome};
use std::time::Duration;

/// Renders probe results and engine signals into reporter lines
pub struct StatusRenderer;

impl StatusRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_start(&self, url: &str, interval: Duration) -> String {
        format!(
            "Starting uptime monitoring for {} every {} seconds",
            url,
            interval.as_secs()
        )
    }

    /// Success line: URL, response time and status
    pub fn render_success(&self, url: &str, outcome: &ProbeOutcome) -> String {
        format!(
            "URL: {} | Response Time: {:?} | Status: {}",
            url, outcome.elapsed, outcome.status_code
        )
    }

    /// Failure line; the error text falls back to the status code if absent
    pub fn render_failure(&self, url: &str, outcome: &ProbeOutcome) -> String {
        let error = outcome
            .error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_else(|| format!("status {}", outcome.status_code));
        format!(
            "failed to check URL {} | Elapsed Time: {:?} | Error: {}",
            url, outcome.elapsed, error
        )
    }

    pub fn render_event(&self, event: &ProbeEvent) -> String {
        match event {
            ProbeEvent::BackoffDefaulted { applied } => format!(
                "Invalid backoffDuration provided. Enforcing minimum value of {} seconds.",
                applied.as_secs()
            ),
            ProbeEvent::Backoff {
                attempt,
                max_attempts,
                wait,
                ..
            } => format!(
                "Backoff before retrying... Attempt {} of {}. Waiting for {:?}",
                attempt, max_attempts, wait
            ),
        }
    }

    pub fn render_recovery(&self, url: &str, failures: u32) -> String {
        format!(
            "URL {} recovered after {} consecutive failed check{}",
            url,
            failures,
            if failures == 1 { "" } else { "s" }
        )
    }

    /// Final diagnostic emitted before the driver halts
    pub fn render_tripped(&self, url: &str, failures: u32, threshold: u32) -> String {
        format!(
            "URL {} failed {} consecutive checks (threshold {}); halting monitoring",
            url, failures, threshold
        )
    }
}

impl Default for StatusRenderer {
    fn default() -> Self {
        Self::new()
    }
}
