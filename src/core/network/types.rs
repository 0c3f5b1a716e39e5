// Core types for uptime probing
use std::time::Duration;

/// Fixed per-request timeout, independent of the backoff timers
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Attempt count substituted when the caller passes zero
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Backoff base substituted when the caller passes a non-positive duration
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(3);

/// Consecutive failed cycles after which the driver halts
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;

/// Coarse classification of a probe failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    InsecureScheme,
    ForbiddenHost,
    Transport,
    NonSuccessStatus,
}

/// Probe failures surfaced to the caller
///
/// Validation variants are produced before any network attempt. `Transport`
/// is the only retryable variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid or non-absolute URL: {0}")]
    InvalidUrl(String),
    #[error("only HTTPS URLs are allowed, got scheme '{0}'")]
    InsecureScheme(String),
    #[error("localhost or private IPs are not allowed: {0}")]
    ForbiddenHost(String),
    #[error("error during request: {0}")]
    Transport(String),
    #[error("non-success status code: {status} {reason}")]
    NonSuccessStatus { status: u16, reason: String },
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            ProbeError::InsecureScheme(_) => ErrorKind::InsecureScheme,
            ProbeError::ForbiddenHost(_) => ErrorKind::ForbiddenHost,
            ProbeError::Transport(_) => ErrorKind::Transport,
            ProbeError::NonSuccessStatus { .. } => ErrorKind::NonSuccessStatus,
        }
    }

    /// Only transport-level failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProbeError::Transport(_))
    }

    /// Build a `NonSuccessStatus` error with the canonical reason phrase
    pub fn non_success(status: u16) -> Self {
        let reason = isahc::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string();
        ProbeError::NonSuccessStatus { status, reason }
    }
}

/// Retry parameters after default substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl RetryPolicy {
    /// Normalize caller input: zero attempts becomes 3, a zero backoff becomes 3s
    pub fn new(max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 {
                DEFAULT_MAX_ATTEMPTS
            } else {
                max_attempts
            },
            base_backoff: if base_backoff.is_zero() {
                DEFAULT_BACKOFF
            } else {
                base_backoff
            },
        }
    }

    /// Wait inserted after failed `attempt` (1-indexed): `base * 2^(attempt-1)`
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = 2u32.checked_pow(exponent).unwrap_or(u32::MAX);
        self.base_backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BACKOFF)
    }
}

/// Result of one engine invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// HTTP status of the final attempt, 0 when no response was received
    pub status_code: u16,
    /// Elapsed time of the final attempt
    pub elapsed: Duration,
    /// Terminal error, `None` on success
    pub error: Option<ProbeError>,
    /// Network attempts made (0 when validation rejected the target)
    pub attempts: u32,
}

impl ProbeOutcome {
    pub fn success(status_code: u16, elapsed: Duration, attempts: u32) -> Self {
        Self {
            status_code,
            elapsed,
            error: None,
            attempts,
        }
    }

    pub fn failure(status_code: u16, elapsed: Duration, error: ProbeError, attempts: u32) -> Self {
        Self {
            status_code,
            elapsed,
            error: Some(error),
            attempts,
        }
    }

    /// Outcome for a target rejected before any network I/O
    pub fn rejected(error: ProbeError) -> Self {
        Self::failure(0, Duration::ZERO, error, 0)
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(ProbeError::kind)
    }
}

/// Warning signals raised by the engine while probing
///
/// The engine never writes output itself; the driver decides how to report these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    /// Caller supplied a non-positive backoff; `applied` is used instead
    BackoffDefaulted { applied: Duration },
    /// A transport failure is about to be retried after `wait`
    Backoff {
        attempt: u32,
        max_attempts: u32,
        wait: Duration,
        error: ProbeError,
    },
}
