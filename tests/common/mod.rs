//! Common test utilities: scripted HTTP client, recording sleeper/observer/reporter

#![allow(dead_code)]

use argus::core::network::{HttpClientTrait, ProbeEvent, ProbeObserver, SleepTrait};
use argus::reporter::Reporter;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Test helper to create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub type MockResult = Result<(u16, Duration), String>;

/// Scripted HTTP client: pops queued responses in order, then repeats the fallback
#[derive(Clone)]
pub struct TestHttpClient {
    responses: Arc<Mutex<VecDeque<MockResult>>>,
    fallback: Arc<Mutex<MockResult>>,
    calls: Arc<Mutex<Vec<(String, Duration)>>>,
}

impl TestHttpClient {
    pub fn new() -> Self {
        Self::always(Ok((200, Duration::from_millis(120))))
    }

    /// Client returning `result` for every request
    pub fn always(result: MockResult) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(Mutex::new(result)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always_status(status: u16) -> Self {
        Self::always(Ok((status, Duration::from_millis(120))))
    }

    pub fn always_transport_error() -> Self {
        Self::always(Err("connection refused".to_string()))
    }

    /// Queue a one-shot response served before the fallback
    pub fn push(&self, result: MockResult) {
        self.responses.lock().unwrap().push_back(result);
    }

    pub fn push_status(&self, status: u16, duration_ms: u64) {
        self.push(Ok((status, Duration::from_millis(duration_ms))));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.push(Err(message.to_string()));
    }

    pub fn set_fallback(&self, result: MockResult) {
        *self.fallback.lock().unwrap() = result;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpClientTrait for TestHttpClient {
    async fn execute_request(&self, url: &str, timeout: Duration) -> Result<(u16, Duration), String> {
        self.calls.lock().unwrap().push((url.to_string(), timeout));
        if let Some(result) = self.responses.lock().unwrap().pop_front() {
            return result;
        }
        self.fallback.lock().unwrap().clone()
    }
}

/// Sleeper that records requested durations and returns immediately
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SleepTrait for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Observer that keeps every engine signal
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ProbeEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProbeEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProbeObserver for RecordingObserver {
    fn on_event(&self, event: &ProbeEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// Reporter that keeps every message with its level
#[derive(Clone, Default)]
pub struct RecordingReporter {
    messages: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        self.messages.lock().unwrap().push((level, message.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
