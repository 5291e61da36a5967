//! Upstream monitoring API client
//!
//! - `client.rs` - JSON-RPC transport, authentication plan and the gateway port
//! - `envelope.rs` - request/response envelope helpers and error classification

pub mod client;
pub mod envelope;

pub use client::ZabbixClient;
pub use envelope::{is_auth_rejection, normalize_endpoint};
