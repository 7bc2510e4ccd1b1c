pub mod server;
pub mod wire;

pub use server::DnsServerHandler;
pub use wire::WireCodec;
