use std::fmt;
use std::net::IpAddr;

/// Prefix length advertised in the `edns_client_subnet` parameter.
pub const CLIENT_SUBNET_PREFIX: u8 = 24;

/// Addresses resolved once at startup and shared read-only by every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointConfig {
    pub public_ip: IpAddr,
    pub proxy_ip: IpAddr,
    pub upstream_ip: IpAddr,
}

impl EndpointConfig {
    pub fn new(public_ip: IpAddr, proxy_ip: IpAddr, upstream_ip: IpAddr) -> Self {
        Self {
            public_ip,
            proxy_ip,
            upstream_ip,
        }
    }
}

/// Which address the upstream resolver is told the client sits behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    Proxy(IpAddr),
    Public(IpAddr),
}

impl RoutingDecision {
    pub fn ip(&self) -> IpAddr {
        match self {
            RoutingDecision::Proxy(ip) | RoutingDecision::Public(ip) => *ip,
        }
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self, RoutingDecision::Proxy(_))
    }

    /// `IP/24`, the value of the `edns_client_subnet` query parameter.
    pub fn client_subnet(&self) -> String {
        format!("{}/{}", self.ip(), CLIENT_SUBNET_PREFIX)
    }
}

impl fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingDecision::Proxy(ip) => write!(f, "proxy({})", ip),
            RoutingDecision::Public(ip) => write!(f, "public({})", ip),
        }
    }
}
