//! Domain Port Interfaces
//!
//! Boundary contracts implemented by the infrastructure layer. The server
//! depends only on these traits, so tests can substitute stubs.

/// Upstream monitoring API port
pub mod upstream;

pub use upstream::{SharedUpstreamGateway, UpstreamGateway};
