use dohgate_domain::{DomainSet, Query, RoutingDecision, UpstreamRequest, UpstreamResponse};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const CLIENT: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100)), 40000);

#[test]
fn test_client_subnet_is_fixed_slash_24() {
    let decision = RoutingDecision::Proxy("203.0.113.7".parse().unwrap());
    assert_eq!(decision.client_subnet(), "203.0.113.7/24");
    assert!(decision.is_proxy());

    let decision = RoutingDecision::Public("198.51.100.1".parse().unwrap());
    assert_eq!(decision.client_subnet(), "198.51.100.1/24");
    assert!(!decision.is_proxy());
}

#[test]
fn test_upstream_request_from_query() {
    let query = Query::new(0x1234, "example.com.", 1, CLIENT);
    let decision = RoutingDecision::Public("198.51.100.1".parse().unwrap());

    let request = UpstreamRequest::new(&query, &decision);

    assert_eq!(
        request.query_params(),
        [
            ("name", "example.com."),
            ("type", "A"),
            ("edns_client_subnet", "198.51.100.1/24"),
        ]
    );
}

#[test]
fn test_upstream_request_numeric_type() {
    let query = Query::new(1, "example.com.", 65, CLIENT);
    let decision = RoutingDecision::Public("198.51.100.1".parse().unwrap());

    let request = UpstreamRequest::new(&query, &decision);
    assert_eq!(request.record_type, "65");
}

#[test]
fn test_query_defaults() {
    let query = Query::new(7, "example.com.", 28, CLIENT);
    assert_eq!(query.qclass, 1);
    assert!(query.recursion_desired);
    assert_eq!(query.client, CLIENT);
}

#[test]
fn test_domain_set_string_suffix_semantics() {
    let set = DomainSet::from_suffixes(["blocked.example"]);

    assert!(set.matches_suffix("blocked.example"));
    assert!(set.matches_suffix("sub.blocked.example"));
    assert!(set.matches_suffix("notblocked.example"));
    assert!(!set.matches_suffix("blocked.example.org"));
    assert!(!set.matches_suffix("other.com"));
}

#[test]
fn test_empty_response_counts() {
    let response = UpstreamResponse::new(3);
    assert_eq!(response.status, 3);
    assert_eq!(response.record_count(), 0);
}
