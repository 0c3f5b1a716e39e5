use argus::core::network::{ProbeError, ProbeEvent, ProbeOutcome, StatusRenderer};
use std::time::Duration;

#[test]
fn test_render_start() {
    let renderer = StatusRenderer::new();
    assert_eq!(
        renderer.render_start("https://example.com", Duration::from_secs(30)),
        "Starting uptime monitoring for https://example.com every 30 seconds"
    );
}

#[test]
fn test_render_success() {
    let renderer = StatusRenderer::new();
    let outcome = ProbeOutcome::success(204, Duration::from_millis(1500), 1);
    assert_eq!(
        renderer.render_success("https://example.com", &outcome),
        "URL: https://example.com | Response Time: 1.5s | Status: 204"
    );
}

#[test]
fn test_render_failure_transport() {
    let renderer = StatusRenderer::new();
    let outcome = ProbeOutcome::failure(
        0,
        Duration::from_millis(12),
        ProbeError::Transport("connection refused".into()),
        3,
    );
    assert_eq!(
        renderer.render_failure("https://example.com", &outcome),
        "failed to check URL https://example.com | Elapsed Time: 12ms | Error: error during request: connection refused"
    );
}

#[test]
fn test_render_failure_validation() {
    let renderer = StatusRenderer::new();
    let outcome = ProbeOutcome::rejected(ProbeError::InsecureScheme("http".into()));
    assert_eq!(
        renderer.render_failure("http://example.com", &outcome),
        "failed to check URL http://example.com | Elapsed Time: 0ns | Error: only HTTPS URLs are allowed, got scheme 'http'"
    );
}

#[test]
fn test_render_events() {
    let renderer = StatusRenderer::new();
    assert_eq!(
        renderer.render_event(&ProbeEvent::BackoffDefaulted {
            applied: Duration::from_secs(3)
        }),
        "Invalid backoffDuration provided. Enforcing minimum value of 3 seconds."
    );
    assert_eq!(
        renderer.render_event(&ProbeEvent::Backoff {
            attempt: 2,
            max_attempts: 4,
            wait: Duration::from_secs(4),
            error: ProbeError::Transport("timeout".into()),
        }),
        "Backoff before retrying... Attempt 2 of 4. Waiting for 4s"
    );
}

#[test]
fn test_render_recovery_and_tripped() {
    let renderer = StatusRenderer::new();
    assert_eq!(
        renderer.render_recovery("https://example.com", 1),
        "URL https://example.com recovered after 1 consecutive failed check"
    );
    assert_eq!(
        renderer.render_tripped("https://example.com", 5, 5),
        "URL https://example.com failed 5 consecutive checks (threshold 5); halting monitoring"
    );
}
