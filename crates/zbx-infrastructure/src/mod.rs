//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that support the server.
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based layered configuration (defaults, TOML, env) |
//! | [`constants`] | Centralized configuration defaults |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### External Services
//! | Module | Description |
//! |--------|-------------|
//! | [`upstream`] | JSON-RPC client for the monitoring API |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod upstream;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use upstream::ZabbixClient;
