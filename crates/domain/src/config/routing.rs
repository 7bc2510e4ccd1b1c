use serde::{Deserialize, Serialize};

/// Shipped placeholder; operators are expected to replace it.
pub const DEFAULT_PROXY_IP: &str = "45.32.15.77";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingConfig {
    /// Advertised as client subnet for names in the domain file.
    #[serde(default = "default_proxy_ip")]
    pub proxy_ip: String,

    /// Advertised for every other name. Discovered at startup when unset.
    #[serde(default)]
    pub public_ip: Option<String>,

    #[serde(default = "default_public_ip_url")]
    pub public_ip_url: String,

    /// Newline-delimited domain suffixes routed through the proxy.
    #[serde(default = "default_domain_file")]
    pub domain_file: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            proxy_ip: default_proxy_ip(),
            public_ip: None,
            public_ip_url: default_public_ip_url(),
            domain_file: default_domain_file(),
        }
    }
}

impl RoutingConfig {
    pub fn uses_default_proxy_ip(&self) -> bool {
        self.proxy_ip == DEFAULT_PROXY_IP
    }
}

fn default_proxy_ip() -> String {
    DEFAULT_PROXY_IP.to_string()
}

fn default_public_ip_url() -> String {
    "https://api.ipify.org?format=json".to_string()
}

fn default_domain_file() -> String {
    "BlockedDomains.dat".to_string()
}
