use async_trait::async_trait;
use bytes::Bytes;
use dohgate_domain::{DomainError, UpstreamRequest};

#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Performs one DoH JSON call and returns the raw response body.
    ///
    /// Transport, TLS and non-success HTTP statuses surface as
    /// `DomainError::UpstreamUnavailable`.
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Bytes, DomainError>;

    /// Logical resolver name, used in logs and timeout errors.
    fn server_name(&self) -> &str;
}
