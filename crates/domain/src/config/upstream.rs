use serde::{Deserialize, Serialize};

/// DoH JSON endpoint and how to reach it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Logical resolver host, used for SNI, certificate checks and `Host`.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_https_port")]
    pub port: u16,

    /// Pre-resolved resolver address. When unset it is looked up at startup
    /// through `bootstrap_nameservers`.
    #[serde(default)]
    pub address: Option<String>,

    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Per-call limit in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default = "default_bootstrap_nameservers")]
    pub bootstrap_nameservers: Vec<String>,

    /// Per-nameserver limit in milliseconds.
    #[serde(default = "default_bootstrap_timeout")]
    pub bootstrap_timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            path: default_path(),
            port: default_https_port(),
            address: None,
            max_concurrent: default_max_concurrent(),
            query_timeout: default_query_timeout(),
            bootstrap_nameservers: default_bootstrap_nameservers(),
            bootstrap_timeout: default_bootstrap_timeout(),
        }
    }
}

impl UpstreamConfig {
    pub fn endpoint_url(&self) -> String {
        if self.port == default_https_port() {
            format!("https://{}{}", self.host, self.path)
        } else {
            format!("https://{}:{}{}", self.host, self.port, self.path)
        }
    }
}

fn default_host() -> String {
    "dns.google.com".to_string()
}

fn default_path() -> String {
    "/resolve".to_string()
}

fn default_https_port() -> u16 {
    443
}

fn default_max_concurrent() -> usize {
    10
}

fn default_query_timeout() -> u64 {
    5
}

fn default_bootstrap_nameservers() -> Vec<String> {
    vec!["114.114.114.114:53".to_string(), "119.29.29.29:53".to_string()]
}

fn default_bootstrap_timeout() -> u64 {
    2000
}
