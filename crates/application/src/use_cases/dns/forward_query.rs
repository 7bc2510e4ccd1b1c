use crate::ports::UpstreamClient;
use crate::services::{ConcurrencyGate, ResponseTranslator, RoutingPolicy};
use bytes::Bytes;
use dohgate_domain::{DomainError, Query, UpstreamRequest, UpstreamResponse};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Routed → Upstream-Pending → Translated for one decoded query.
///
/// No retries: the first failure ends the query and is returned to the
/// caller, which drops it without replying.
pub struct ForwardQueryUseCase {
    routing: RoutingPolicy,
    upstream: Arc<dyn UpstreamClient>,
    gate: Arc<ConcurrencyGate>,
    timeout: Duration,
}

impl ForwardQueryUseCase {
    pub fn new(
        routing: RoutingPolicy,
        upstream: Arc<dyn UpstreamClient>,
        gate: Arc<ConcurrencyGate>,
        timeout: Duration,
    ) -> Self {
        Self {
            routing,
            upstream,
            gate,
            timeout,
        }
    }

    pub async fn execute(&self, query: &Query) -> Result<UpstreamResponse, DomainError> {
        let start = Instant::now();

        let decision = self.routing.decide(&query.name);
        let request = UpstreamRequest::new(query, &decision);

        let body = self.fetch(&request).await?;
        let response = ResponseTranslator::translate(&body)?;

        debug!(
            domain = %query.name,
            qtype = query.qtype,
            subnet = %request.edns_client_subnet,
            status = response.status,
            records = response.record_count(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Upstream answer translated"
        );

        Ok(response)
    }

    /// Holds one gate permit for the whole call; the permit is dropped on
    /// success, error and timeout alike.
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Bytes, DomainError> {
        let _permit = self.gate.acquire().await?;

        match tokio::time::timeout(self.timeout, self.upstream.fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::UpstreamTimeout {
                server: self.upstream.server_name().to_string(),
            }),
        }
    }

    pub fn gate(&self) -> &Arc<ConcurrencyGate> {
        &self.gate
    }
}
