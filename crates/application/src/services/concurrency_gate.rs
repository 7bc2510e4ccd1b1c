use dohgate_domain::DomainError;
use tokio::sync::{Semaphore, SemaphorePermit};

/// Upper bound on concurrent upstream calls.
///
/// A permit is held for the lifetime of the returned guard, so it is
/// released exactly once on every exit path, including cancellation.
#[derive(Debug)]
pub struct ConcurrencyGate {
    semaphore: Semaphore,
    max_permits: usize,
}

impl ConcurrencyGate {
    pub fn new(max_permits: usize) -> Self {
        let max_permits = max_permits.max(1);
        Self {
            semaphore: Semaphore::new(max_permits),
            max_permits,
        }
    }

    pub async fn acquire(&self) -> Result<SemaphorePermit<'_>, DomainError> {
        self.semaphore
            .acquire()
            .await
            .map_err(|_| DomainError::UpstreamUnavailable("concurrency gate closed".to_string()))
    }

    pub fn max_permits(&self) -> usize {
        self.max_permits
    }

    pub fn in_flight(&self) -> usize {
        self.max_permits - self.semaphore.available_permits()
    }
}
