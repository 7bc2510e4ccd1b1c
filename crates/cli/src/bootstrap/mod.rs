mod config;
mod endpoints;
mod logging;

pub use config::load_config;
pub use endpoints::{load_domains, resolve_endpoints};
pub use logging::init_logging;
