//! dohgate domain layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod domain_set;
pub mod endpoint;
pub mod errors;
pub mod upstream;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::Query;
pub use dns_record::{DnsRecord, RecordData, RecordType, SoaData};
pub use domain_set::DomainSet;
pub use endpoint::{EndpointConfig, RoutingDecision};
pub use errors::DomainError;
pub use upstream::{UpstreamRequest, UpstreamResponse};
