use dohgate_application::services::{ConcurrencyGate, RoutingPolicy};
use dohgate_application::use_cases::ForwardQueryUseCase;
use dohgate_domain::{Config, DomainSet, EndpointConfig};
use dohgate_infrastructure::dns::DnsServerHandler;
use dohgate_infrastructure::doh::DohJsonClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
    pub gate: Arc<ConcurrencyGate>,
}

impl DnsServices {
    pub fn new(
        config: &Config,
        endpoints: EndpointConfig,
        domains: DomainSet,
    ) -> anyhow::Result<Self> {
        let upstream = Arc::new(DohJsonClient::new(&config.upstream, endpoints.upstream_ip)?);
        let gate = Arc::new(ConcurrencyGate::new(config.upstream.max_concurrent));
        let timeout = Duration::from_secs(config.upstream.query_timeout);

        info!(
            url = %upstream.url(),
            max_concurrent = gate.max_permits(),
            timeout_secs = config.upstream.query_timeout,
            domains = domains.len(),
            "Initializing DNS services"
        );

        let routing = RoutingPolicy::new(endpoints, Arc::new(domains));
        let use_case = ForwardQueryUseCase::new(routing, upstream, gate.clone(), timeout);

        Ok(Self {
            handler: DnsServerHandler::new(Arc::new(use_case)),
            gate,
        })
    }
}
