use std::net::SocketAddr;
use std::sync::Arc;

pub const CLASS_IN: u16 = 1;

/// One inbound DNS request as decoded from a UDP datagram.
///
/// `name` keeps the fully-qualified form with the trailing root dot
/// (`example.com.`), which is also what the DoH endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub id: u16,
    pub name: Arc<str>,
    pub qtype: u16,
    pub qclass: u16,
    pub recursion_desired: bool,
    pub client: SocketAddr,
}

impl Query {
    pub fn new(id: u16, name: impl Into<Arc<str>>, qtype: u16, client: SocketAddr) -> Self {
        Self {
            id,
            name: name.into(),
            qtype,
            qclass: CLASS_IN,
            recursion_desired: true,
            client,
        }
    }

    pub fn with_class(mut self, qclass: u16) -> Self {
        self.qclass = qclass;
        self
    }

    pub fn with_recursion_desired(mut self, recursion_desired: bool) -> Self {
        self.recursion_desired = recursion_desired;
        self
    }
}
