use super::{DnsRecord, Query, RecordType, RoutingDecision};
use std::sync::Arc;

/// Shape of one outbound DoH JSON call. Host, path and the pinned address
/// belong to the client; this carries only the per-query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub name: Arc<str>,
    pub record_type: String,
    pub edns_client_subnet: String,
}

impl UpstreamRequest {
    pub fn new(query: &Query, decision: &RoutingDecision) -> Self {
        Self {
            name: query.name.clone(),
            record_type: RecordType::query_param(query.qtype),
            edns_client_subnet: decision.client_subnet(),
        }
    }

    pub fn query_params(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_ref()),
            ("type", self.record_type.as_str()),
            ("edns_client_subnet", self.edns_client_subnet.as_str()),
        ]
    }
}

/// Translated DoH payload: the status becomes the reply RCODE.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub answers: Vec<DnsRecord>,
    pub authorities: Vec<DnsRecord>,
}

impl UpstreamResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn record_count(&self) -> usize {
        self.answers.len() + self.authorities.len()
    }
}
