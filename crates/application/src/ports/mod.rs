mod upstream_client;

pub use upstream_client::UpstreamClient;

// Re-export for convenience
pub use dohgate_domain::{UpstreamRequest, UpstreamResponse};
