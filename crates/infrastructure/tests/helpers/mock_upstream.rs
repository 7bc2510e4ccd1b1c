use async_trait::async_trait;
use bytes::Bytes;
use dohgate_application::ports::UpstreamClient;
use dohgate_domain::{DomainError, UpstreamRequest};
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// Canned DoH JSON bodies keyed by query name; unknown names fail.
pub struct MockUpstreamClient {
    bodies: RwLock<HashMap<String, Result<Bytes, DomainError>>>,
    requests: Mutex<Vec<UpstreamRequest>>,
}

impl MockUpstreamClient {
    pub fn new() -> Self {
        Self {
            bodies: RwLock::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_body(&self, name: &str, body: &str) {
        self.bodies
            .write()
            .unwrap()
            .insert(name.to_string(), Ok(Bytes::from(body.to_string())));
    }

    pub fn set_error(&self, name: &str, error: DomainError) {
        self.bodies
            .write()
            .unwrap()
            .insert(name.to_string(), Err(error));
    }

    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Bytes, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        self.bodies
            .read()
            .unwrap()
            .get(request.name.as_ref())
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::UpstreamUnavailable(format!(
                    "no mock body for {}",
                    request.name
                )))
            })
    }

    fn server_name(&self) -> &str {
        "mock.resolver"
    }
}
