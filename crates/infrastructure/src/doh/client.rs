//! DNS-over-HTTPS, JSON API flavour.
//!
//! ```text
//! GET /resolve?name=example.com.&type=A&edns_client_subnet=203.0.113.7%2F24 HTTP/2
//! Host: dns.google.com
//! Accept: application/dns-json
//! ```
//!
//! The TCP connection always goes to the pre-resolved upstream address; the
//! logical host still drives SNI, certificate validation and `Host`.

use async_trait::async_trait;
use bytes::Bytes;
use dohgate_application::ports::UpstreamClient;
use dohgate_domain::config::UpstreamConfig;
use dohgate_domain::{DomainError, UpstreamRequest};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

pub struct DohJsonClient {
    client: reqwest::Client,
    url: String,
    host: String,
}

impl DohJsonClient {
    pub fn new(config: &UpstreamConfig, upstream_ip: IpAddr) -> Result<Self, DomainError> {
        let pinned = SocketAddr::new(upstream_ip, config.port);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .resolve(&config.host, pinned)
            .timeout(Duration::from_secs(config.query_timeout))
            .pool_max_idle_per_host(config.max_concurrent)
            .build()
            .map_err(|e| DomainError::IoError(format!("Failed to build HTTPS client: {}", e)))?;

        debug!(host = %config.host, pinned = %pinned, "DoH client pinned to upstream address");

        Ok(Self::with_client(client, config.endpoint_url(), config.host.clone()))
    }

    /// Wraps an already configured client; `url` is the full endpoint URL.
    pub fn with_client(client: reqwest::Client, url: String, host: String) -> Self {
        Self { client, url, host }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_send_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::UpstreamTimeout {
                server: self.host.clone(),
            }
        } else {
            DomainError::UpstreamUnavailable(format!("DoH request to {} failed: {}", self.host, e))
        }
    }
}

#[async_trait]
impl UpstreamClient for DohJsonClient {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<Bytes, DomainError> {
        debug!(
            url = %self.url,
            domain = %request.name,
            record_type = %request.record_type,
            subnet = %request.edns_client_subnet,
            "Sending DoH JSON query"
        );

        let response = self
            .client
            .get(&self.url)
            .query(&request.query_params())
            .header("Accept", DNS_JSON_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamUnavailable(format!(
                "DoH server {} returned HTTP {}: {}",
                self.host,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.bytes().await.map_err(|e| self.map_send_error(e))?;

        debug!(url = %self.url, response_len = body.len(), "DoH response received");

        Ok(body)
    }

    fn server_name(&self) -> &str {
        &self.host
    }
}
