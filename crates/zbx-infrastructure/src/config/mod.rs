//! Configuration management
//!
//! Layered configuration built with Figment: defaults, then a TOML file,
//! then legacy flat environment aliases, then `ZBX__`-prefixed variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppConfig, LoggingConfig, PolicyConfig, ServerConfig, SessionConfig, UpstreamConfig,
};
