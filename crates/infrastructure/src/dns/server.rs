use crate::dns::wire::WireCodec;
use dohgate_application::use_cases::ForwardQueryUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns one inbound datagram into at most one reply datagram.
///
/// Every failure ends in silence: the client gets no reply and retries on its
/// own schedule.
pub struct DnsServerHandler {
    use_case: Arc<ForwardQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ForwardQueryUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle_datagram(&self, datagram: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let query = match WireCodec::parse(datagram, client) {
            Ok(query) => query,
            Err(e) => {
                debug!(client = %client, len = datagram.len(), error = %e, "Dropping undecodable datagram");
                return None;
            }
        };

        info!(domain = %query.name, qtype = query.qtype, client = %client.ip(), "DNS query received");

        let response = match self.use_case.execute(&query).await {
            Ok(response) => response,
            Err(e) if e.is_upstream_failure() => {
                warn!(domain = %query.name, error = %e, "Upstream failed, dropping query");
                return None;
            }
            Err(e) => {
                warn!(domain = %query.name, error = %e, "Upstream answer unusable, dropping query");
                return None;
            }
        };

        match WireCodec::serialize(&query, &response) {
            Ok(reply) => {
                debug!(domain = %query.name, bytes = reply.len(), "Sending response");
                Some(reply)
            }
            Err(e) => {
                warn!(domain = %query.name, error = %e, "Failed to encode reply");
                None
            }
        }
    }

    pub fn use_case(&self) -> &ForwardQueryUseCase {
        &self.use_case
    }
}
