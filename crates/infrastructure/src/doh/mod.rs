mod client;

pub use client::DohJsonClient;
