/*!
HTTPS probe engine with bounded retries and exponential backoff.

This module implements the HttpMonitor component - the probe-and-retry core of
the uptime monitor. It validates the target, executes GET probes with a fixed
request timeout and returns a normalized [`ProbeOutcome`].

## Retry Semantics

- **Success** (2xx): returned immediately, remaining attempts skipped
- **Non-2xx**: returned immediately, a definitive HTTP answer is never retried
- **Transport failure**: retried after `base_backoff * 2^(attempt-1)` while
  attempts remain; the last transport error is returned once they run out

## Side Effects

The engine writes no output. Warning signals (default backoff substitution,
backoff before a retry) are delivered to an injected [`ProbeObserver`].

## Dependencies

- `isahc`: HTTP client with per-request timeout and redirect policy
- `tokio`: Async runtime and backoff timer
*/

use crate::core::network::target::Target;
use crate::core::network::types::*;
use std::time::{Duration, Instant};

use isahc::config::{Configurable, RedirectPolicy};
use isahc::{AsyncReadResponseExt, HttpClient, Request};

/// Redirect hops followed before the final status is classified
const MAX_REDIRECTS: u32 = 10;

/// HTTP client abstraction for dependency injection and testing
#[async_trait::async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// Execute a GET request with timing measurement
    /// Returns (status_code, duration) or a transport error description
    async fn execute_request(&self, url: &str, timeout: Duration) -> Result<(u16, Duration), String>;
}

/// Clock abstraction for dependency injection and testing
pub trait ClockTrait: Send + Sync {
    /// Get current monotonic time
    fn now(&self) -> Instant;
}

/// Sleep abstraction so backoff and interval waits can be observed in tests
#[async_trait::async_trait]
pub trait SleepTrait: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Receiver for engine warning signals
pub trait ProbeObserver: Send + Sync {
    fn on_event(&self, event: &ProbeEvent);
}

/// Production HTTP client implementation using isahc
pub struct IsahcHttpClient {
    client: HttpClient,
}

#[async_trait::async_trait]
impl HttpClientTrait for IsahcHttpClient {
    async fn execute_request(&self, url: &str, timeout: Duration) -> Result<(u16, Duration), String> {
        let start = Instant::now();

        let request = Request::get(url)
            .timeout(timeout)
            .header("User-Agent", concat!("argus/", env!("CARGO_PKG_VERSION")))
            .body(())
            .map_err(|e| format!("request creation failed: {}", e))?;

        let mut response = self
            .client
            .send_async(request)
            .await
            .map_err(|e| e.to_string())?;
        let duration = start.elapsed();

        let status = response.status().as_u16();

        // Drain the body so the connection can be reused
        let _ = response.consume().await;

        Ok((status, duration))
    }
}

impl IsahcHttpClient {
    pub fn new() -> Result<Self, ProbeError> {
        let client = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect_policy(RedirectPolicy::Limit(MAX_REDIRECTS))
            .build()
            .map_err(|e| ProbeError::Transport(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

/// Production clock implementation using system time
#[derive(Default)]
pub struct SystemClock;

impl ClockTrait for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Production sleeper backed by the tokio timer
#[derive(Default)]
pub struct TokioSleeper;

#[async_trait::async_trait]
impl SleepTrait for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Observer that drops every signal
#[derive(Default)]
pub struct NoopObserver;

impl ProbeObserver for NoopObserver {
    fn on_event(&self, _event: &ProbeEvent) {}
}

/// HTTPS probe engine
///
/// Stateless per invocation: the client, clock, sleeper and observer are
/// configured once and hold no per-call mutable state.
pub struct HttpMonitor {
    /// HTTP client for probe execution
    http_client: Box<dyn HttpClientTrait>,
    /// Clock for timing operations
    clock: Box<dyn ClockTrait>,
    /// Timer used between attempts
    sleeper: Box<dyn SleepTrait>,
    /// Sink for warning signals
    observer: Box<dyn ProbeObserver>,
}

impl HttpMonitor {
    /// Create new HttpMonitor backed by isahc and the tokio timer
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::Transport` if HTTP client creation fails.
    pub fn new() -> Result<Self, ProbeError> {
        Ok(Self::with_client(Box::new(IsahcHttpClient::new()?)))
    }

    /// Create HttpMonitor around an arbitrary client with production defaults otherwise
    pub fn with_client(http_client: Box<dyn HttpClientTrait>) -> Self {
        Self {
            http_client,
            clock: Box::new(SystemClock),
            sleeper: Box::new(TokioSleeper),
            observer: Box::new(NoopObserver),
        }
    }

    /// Configure HttpMonitor with custom HTTP client (for testing)
    pub fn with_http_client(mut self, client: Box<dyn HttpClientTrait>) -> Self {
        self.http_client = client;
        self
    }

    /// Configure HttpMonitor with custom clock (for testing)
    pub fn with_clock(mut self, clock: Box<dyn ClockTrait>) -> Self {
        self.clock = clock;
        self
    }

    /// Configure the timer used for backoff waits
    pub fn with_sleeper(mut self, sleeper: Box<dyn SleepTrait>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Configure the receiver of warning signals
    pub fn with_observer(mut self, observer: Box<dyn ProbeObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Probe `url` with up to `max_attempts` attempts
    ///
    /// This is the sole entry point the driver consumes.
    ///
    /// # Arguments
    ///
    /// - `url`: raw target URL, validated before any network call
    /// - `max_attempts`: attempt budget, 0 means 3
    /// - `base_backoff`: first backoff wait, zero means 3s (a warning is signalled)
    ///
    /// # Returns
    ///
    /// `ProbeOutcome` with the status code (0 without a response), the elapsed
    /// time of the final attempt and the terminal error if any.
    pub async fn probe(&self, url: &str, max_attempts: u32, base_backoff: Duration) -> ProbeOutcome {
        if base_backoff.is_zero() {
            self.observer.on_event(&ProbeEvent::BackoffDefaulted {
                applied: DEFAULT_BACKOFF,
            });
        }
        let policy = RetryPolicy::new(max_attempts, base_backoff);

        let target = match Target::parse(url) {
            Ok(target) => target,
            Err(err) => return ProbeOutcome::rejected(err),
        };

        self.probe_target(&target, &policy).await
    }

    /// Run the retry loop against an already validated target
    pub async fn probe_target(&self, target: &Target, policy: &RetryPolicy) -> ProbeOutcome {
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let outcome = self.attempt(target, attempt).await;

            // Success, a definitive HTTP answer or the last attempt ends the loop
            let retryable_error = match &outcome.error {
                Some(err) if err.is_retryable() && attempt < max_attempts => Some(err.clone()),
                _ => None,
            };
            let Some(retryable_error) = retryable_error else {
                return outcome;
            };

            let wait = policy.backoff_for(attempt);
            self.observer.on_event(&ProbeEvent::Backoff {
                attempt,
                max_attempts,
                wait,
                error: retryable_error,
            });
            self.sleeper.sleep(wait).await;
            attempt += 1;
        }
    }

    /// Execute exactly one GET against `target` and classify the result
    async fn attempt(&self, target: &Target, attempt: u32) -> ProbeOutcome {
        let start = self.clock.now();

        match self
            .http_client
            .execute_request(target.as_str(), REQUEST_TIMEOUT)
            .await
        {
            Ok((status, duration)) if (200..300).contains(&status) => {
                ProbeOutcome::success(status, duration, attempt)
            }
            Ok((status, duration)) => {
                ProbeOutcome::failure(status, duration, ProbeError::non_success(status), attempt)
            }
            Err(err) => {
                let elapsed = self.clock.now().saturating_duration_since(start);
                ProbeOutcome::failure(0, elapsed, ProbeError::Transport(err), attempt)
            }
        }
    }
}
