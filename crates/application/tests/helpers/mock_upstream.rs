use async_trait::async_trait;
use bytes::Bytes;
use dohgate_application::ports::UpstreamClient;
use dohgate_domain::{DomainError, UpstreamRequest};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockBehavior {
    Body(Bytes),
    Error(DomainError),
    /// Never completes.
    Hang,
}

/// Scripted upstream keyed by query name, tracking concurrent callers.
pub struct MockUpstreamClient {
    behaviors: RwLock<HashMap<String, MockBehavior>>,
    default_behavior: RwLock<MockBehavior>,
    requests: Mutex<Vec<UpstreamRequest>>,
    delay: RwLock<Duration>,
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl MockUpstreamClient {
    pub fn new() -> Self {
        Self {
            behaviors: RwLock::new(HashMap::new()),
            default_behavior: RwLock::new(MockBehavior::Error(DomainError::UpstreamUnavailable(
                "no mock response".to_string(),
            ))),
            requests: Mutex::new(Vec::new()),
            delay: RwLock::new(Duration::ZERO),
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn set_body(&self, name: &str, body: impl Into<String>) {
        self.set_behavior(name, MockBehavior::Body(Bytes::from(body.into())));
    }

    pub fn set_error(&self, name: &str, error: DomainError) {
        self.set_behavior(name, MockBehavior::Error(error));
    }

    pub fn set_hang(&self, name: &str) {
        self.set_behavior(name, MockBehavior::Hang);
    }

    pub fn set_behavior(&self, name: &str, behavior: MockBehavior) {
        self.behaviors
            .write()
            .unwrap()
            .insert(name.to_string(), behavior);
    }

    pub fn set_default(&self, behavior: MockBehavior) {
        *self.default_behavior.write().unwrap() = behavior;
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = delay;
    }

    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn current_concurrency(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }
}

impl Default for MockUpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Bytes, DomainError> {
        self.requests.lock().unwrap().push(request.clone());

        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let _in_flight = InFlight(&self.current);

        let behavior = self
            .behaviors
            .read()
            .unwrap()
            .get(request.name.as_ref())
            .cloned()
            .unwrap_or_else(|| self.default_behavior.read().unwrap().clone());

        let delay = *self.delay.read().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match behavior {
            MockBehavior::Body(body) => Ok(body),
            MockBehavior::Error(e) => Err(e),
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }

    fn server_name(&self) -> &str {
        "mock.resolver"
    }
}
