use dohgate_domain::{Config, DomainSet, EndpointConfig};
use dohgate_infrastructure::bootstrap::{BootstrapResolver, PublicIpDiscovery};
use dohgate_infrastructure::routing::load_domain_file;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Resolves the three addresses every query needs, once, before serving.
pub async fn resolve_endpoints(config: &Config) -> anyhow::Result<EndpointConfig> {
    let proxy_ip = config.proxy_ip()?;
    if config.routing.uses_default_proxy_ip() {
        warn!(
            proxy_ip = %proxy_ip,
            "Using the built-in proxy IP; set routing.proxy_ip or -i to your own proxy address"
        );
    }

    let upstream_ip = match config.upstream_address()? {
        Some(ip) => ip,
        None => {
            let resolver = BootstrapResolver::new(
                config.bootstrap_nameservers()?,
                Duration::from_millis(config.upstream.bootstrap_timeout),
            );
            resolver.resolve_ipv4(&config.upstream.host).await?
        }
    };

    let public_ip = match config.public_ip()? {
        Some(ip) => ip,
        None => {
            let discovery = PublicIpDiscovery::new(
                config.routing.public_ip_url.clone(),
                Duration::from_secs(config.upstream.query_timeout),
            )?;
            discovery.discover().await?
        }
    };

    info!(
        upstream_host = %config.upstream.host,
        upstream_ip = %upstream_ip,
        public_ip = %public_ip,
        proxy_ip = %proxy_ip,
        "Endpoints resolved"
    );

    Ok(EndpointConfig::new(public_ip, proxy_ip, upstream_ip))
}

/// A missing or unreadable list routes every name to the public subnet.
pub fn load_domains(config: &Config) -> DomainSet {
    let path = Path::new(&config.routing.domain_file);
    match load_domain_file(path) {
        Ok(domains) => domains,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Domain list unavailable, routing everything public");
            DomainSet::new()
        }
    }
}
