use dohgate_domain::domain_set::normalize;
use dohgate_domain::{DomainSet, EndpointConfig, RoutingDecision};
use std::sync::Arc;
use tracing::debug;

/// Chooses the client subnet advertised upstream for a query name.
///
/// Names that end with any suffix in the domain set get the proxy address,
/// everything else the operator's public address.
#[derive(Debug, Clone)]
pub struct RoutingPolicy {
    endpoints: EndpointConfig,
    domains: Arc<DomainSet>,
}

impl RoutingPolicy {
    pub fn new(endpoints: EndpointConfig, domains: Arc<DomainSet>) -> Self {
        Self { endpoints, domains }
    }

    pub fn decide(&self, qname: &str) -> RoutingDecision {
        let decision = Self::decide_with(qname, &self.domains, &self.endpoints);
        debug!(domain = %qname, decision = %decision, "Routing decision");
        decision
    }

    pub fn decide_with(
        qname: &str,
        domains: &DomainSet,
        endpoints: &EndpointConfig,
    ) -> RoutingDecision {
        if domains.matches_suffix(&normalize(qname)) {
            RoutingDecision::Proxy(endpoints.proxy_ip)
        } else {
            RoutingDecision::Public(endpoints.public_ip)
        }
    }
}
