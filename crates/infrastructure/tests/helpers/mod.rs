#![allow(dead_code)]

mod dns_server_mock;
mod http_server_mock;
mod mock_upstream;

pub use dns_server_mock::MockNameserver;
pub use http_server_mock::{MockHttpServer, RecordedRequest};
pub use mock_upstream::MockUpstreamClient;

use dohgate_application::services::{ConcurrencyGate, RoutingPolicy};
use dohgate_application::use_cases::ForwardQueryUseCase;
use dohgate_domain::{DomainSet, EndpointConfig};
use dohgate_infrastructure::dns::DnsServerHandler;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

pub const CLIENT: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100)), 53000);

pub fn make_handler(upstream: Arc<MockUpstreamClient>, domains: &[&str]) -> DnsServerHandler {
    let endpoints = EndpointConfig::new(
        IpAddr::V4(Ipv4Addr::new(198, 51, 100, 1)),
        IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7)),
        IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
    );
    let routing = RoutingPolicy::new(endpoints, Arc::new(DomainSet::from_suffixes(domains)));
    let use_case = ForwardQueryUseCase::new(
        routing,
        upstream,
        Arc::new(ConcurrencyGate::new(10)),
        Duration::from_secs(5),
    );
    DnsServerHandler::new(Arc::new(use_case))
}
