//! dohgate infrastructure: wire codec, DoH JSON client, UDP handler and
//! startup bootstrap.
pub mod bootstrap;
pub mod dns;
pub mod doh;
pub mod routing;
