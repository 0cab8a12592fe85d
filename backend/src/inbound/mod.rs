//! Inbound adapters translating transports onto the domain ports.

pub mod http;
