#![allow(dead_code)]

mod mock_upstream;

pub use mock_upstream::{MockBehavior, MockUpstreamClient};

use dohgate_application::services::{ConcurrencyGate, RoutingPolicy};
use dohgate_application::use_cases::ForwardQueryUseCase;
use dohgate_domain::{DomainSet, EndpointConfig, Query};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

pub const PUBLIC_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(198, 51, 100, 1));
pub const PROXY_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7));
pub const UPSTREAM_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));
pub const CLIENT: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100)), 53000);

pub fn endpoints() -> EndpointConfig {
    EndpointConfig::new(PUBLIC_IP, PROXY_IP, UPSTREAM_IP)
}

pub fn routing(domains: &[&str]) -> RoutingPolicy {
    RoutingPolicy::new(endpoints(), Arc::new(DomainSet::from_suffixes(domains)))
}

pub fn query(name: &str, qtype: u16) -> Query {
    Query::new(0x2a2a, name, qtype, CLIENT)
}

pub fn make_use_case(
    upstream: Arc<MockUpstreamClient>,
    domains: &[&str],
    max_concurrent: usize,
    timeout: Duration,
) -> ForwardQueryUseCase {
    ForwardQueryUseCase::new(
        routing(domains),
        upstream,
        Arc::new(ConcurrencyGate::new(max_concurrent)),
        timeout,
    )
}

pub fn a_record_body(name: &str, ip: &str) -> String {
    format!(
        r#"{{"Status":0,"Answer":[{{"name":"{}","type":1,"TTL":300,"data":"{}"}}]}}"#,
        name, ip
    )
}
