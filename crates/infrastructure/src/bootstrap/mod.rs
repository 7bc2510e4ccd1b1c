//! One-shot lookups performed before the listener starts.
mod public_ip;
mod resolver;

pub use public_ip::{parse_public_ip, PublicIpDiscovery};
pub use resolver::BootstrapResolver;
