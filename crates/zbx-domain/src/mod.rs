//! # zbx-mcp Domain Layer
//!
//! Core types shared by every layer of the monitoring MCP server.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`constants`] | Protocol and upstream constants |
//! | [`value_objects`] | Upstream authentication value objects |
//! | [`ports`] | Boundary contracts implemented by infrastructure |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::UpstreamGateway;
pub use value_objects::{AuthStatus, AuthStrategy, Credentials};
