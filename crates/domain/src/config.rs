mod errors;
mod logging;
mod root;
mod routing;
mod server;
mod upstream;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use routing::{RoutingConfig, DEFAULT_PROXY_IP};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
