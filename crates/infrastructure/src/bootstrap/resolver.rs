use crate::dns::wire::WireCodec;
use dohgate_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Plain UDP A lookup against fixed nameservers, used to find the DoH
/// resolver's address without depending on the system resolver.
pub struct BootstrapResolver {
    nameservers: Vec<SocketAddr>,
    timeout: Duration,
}

impl BootstrapResolver {
    pub fn new(nameservers: Vec<SocketAddr>, timeout: Duration) -> Self {
        Self {
            nameservers,
            timeout,
        }
    }

    /// Tries each nameserver in order and returns the first A address.
    pub async fn resolve_ipv4(&self, host: &str) -> Result<IpAddr, DomainError> {
        let fqdn = if host.ends_with('.') {
            host.to_string()
        } else {
            format!("{}.", host)
        };

        for server in &self.nameservers {
            match self.query(*server, &fqdn).await {
                Ok(ip) => {
                    debug!(host = %host, server = %server, ip = %ip, "Bootstrap lookup succeeded");
                    return Ok(IpAddr::V4(ip));
                }
                Err(e) => {
                    warn!(host = %host, server = %server, error = %e, "Bootstrap nameserver failed");
                }
            }
        }

        Err(DomainError::Bootstrap(format!(
            "No bootstrap nameserver resolved {}",
            host
        )))
    }

    async fn query(&self, server: SocketAddr, fqdn: &str) -> Result<Ipv4Addr, DomainError> {
        let id = fastrand::u16(..);
        let request = WireCodec::build_query(fqdn, RecordType::A.to_u16(), id)?;

        let local: SocketAddr = match server {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind socket: {}", e)))?;
        socket
            .connect(server)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to connect to {}: {}", server, e)))?;
        socket
            .send(&request)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to send query: {}", e)))?;

        let mut buf = vec![0u8; 4096];
        let len = tokio::time::timeout(self.timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                server: server.to_string(),
            })?
            .map_err(|e| DomainError::IoError(format!("Failed to receive response: {}", e)))?;

        Self::first_a(&buf[..len], id)
    }

    fn first_a(bytes: &[u8], id: u16) -> Result<Ipv4Addr, DomainError> {
        let message = Message::from_vec(bytes).map_err(|e| {
            DomainError::Bootstrap(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.id() != id {
            return Err(DomainError::Bootstrap(format!(
                "Response id {} does not match query id {}",
                message.id(),
                id
            )));
        }

        if message.response_code() != ResponseCode::NoError {
            return Err(DomainError::Bootstrap(format!(
                "Nameserver answered {:?}",
                message.response_code()
            )));
        }

        message
            .answers()
            .iter()
            .find_map(|record| match record.data() {
                Some(RData::A(a)) => Some(a.0),
                _ => None,
            })
            .ok_or_else(|| DomainError::Bootstrap("No A record in answer".to_string()))
    }
}
