use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS query: {0}")]
    MalformedQuery(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream timeout waiting for {server}")]
    UpstreamTimeout { server: String },

    #[error("Upstream protocol error: {0}")]
    UpstreamProtocolError(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(u16),

    #[error("Failed to encode DNS reply: {0}")]
    EncodeError(String),

    #[error("Bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Connection, handshake, HTTP status or timeout failure toward the resolver.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamUnavailable(_) | DomainError::UpstreamTimeout { .. }
        )
    }

    /// The resolver answered but the payload could not be turned into records.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamProtocolError(_) | DomainError::UnsupportedRecordType(_)
        )
    }
}
