use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::routing::RoutingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "dohgate.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dohgate/config.toml";

/// Main configuration structure for the gateway
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// UDP listener
    #[serde(default)]
    pub server: ServerConfig,

    /// DoH JSON resolver
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Client subnet selection
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dohgate.toml in current directory
    /// 3. /etc/dohgate/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(ip) = overrides.proxy_ip {
            self.routing.proxy_ip = ip;
        }
        if let Some(ip) = overrides.public_ip {
            self.routing.public_ip = Some(ip);
        }
        if let Some(file) = overrides.domain_file {
            self.routing.domain_file = file;
        }
        if let Some(addr) = overrides.upstream_address {
            self.upstream.address = Some(addr);
        }
        if let Some(max) = overrides.max_concurrent {
            self.upstream.max_concurrent = max;
        }
        if overrides.debug {
            self.logging.level = "debug".to_string();
        } else if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.upstream.max_concurrent == 0 {
            return Err(ConfigError::Validation(
                "upstream.max_concurrent must be at least 1".to_string(),
            ));
        }

        if self.upstream.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "upstream.query_timeout must be at least 1 second".to_string(),
            ));
        }

        if self.upstream.host.is_empty() {
            return Err(ConfigError::Validation(
                "upstream.host cannot be empty".to_string(),
            ));
        }

        if !self.upstream.path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "upstream.path must start with '/': {}",
                self.upstream.path
            )));
        }

        self.bind_addr()?;
        self.proxy_ip()?;
        self.public_ip()?;

        if self.upstream_address()?.is_none() && self.bootstrap_nameservers()?.is_empty() {
            return Err(ConfigError::Validation(
                "Either upstream.address or bootstrap_nameservers must be set".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = parse_ip("server.bind_address", &self.server.bind_address)?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn proxy_ip(&self) -> Result<IpAddr, ConfigError> {
        parse_ip("routing.proxy_ip", &self.routing.proxy_ip)
    }

    pub fn public_ip(&self) -> Result<Option<IpAddr>, ConfigError> {
        self.routing
            .public_ip
            .as_deref()
            .map(|ip| parse_ip("routing.public_ip", ip))
            .transpose()
    }

    pub fn upstream_address(&self) -> Result<Option<IpAddr>, ConfigError> {
        self.upstream
            .address
            .as_deref()
            .map(|ip| parse_ip("upstream.address", ip))
            .transpose()
    }

    /// Nameservers accept either `ip` or `ip:port`; port 53 is implied.
    pub fn bootstrap_nameservers(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.upstream
            .bootstrap_nameservers
            .iter()
            .map(|server| {
                server
                    .parse::<SocketAddr>()
                    .or_else(|_| server.parse::<IpAddr>().map(|ip| SocketAddr::new(ip, 53)))
                    .map_err(|_| ConfigError::InvalidAddress {
                        field: "upstream.bootstrap_nameservers",
                        value: server.clone(),
                    })
            })
            .collect()
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

fn parse_ip(field: &'static str, value: &str) -> Result<IpAddr, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidAddress {
            field,
            value: value.to_string(),
        })
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub proxy_ip: Option<String>,
    pub public_ip: Option<String>,
    pub domain_file: Option<String>,
    pub upstream_address: Option<String>,
    pub max_concurrent: Option<usize>,
    pub log_level: Option<String>,
    pub debug: bool,
}
