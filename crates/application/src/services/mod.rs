mod concurrency_gate;
mod response_translator;
mod routing_policy;

pub use concurrency_gate::ConcurrencyGate;
pub use response_translator::ResponseTranslator;
pub use routing_policy::RoutingPolicy;
