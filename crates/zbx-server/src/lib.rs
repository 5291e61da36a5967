//! # zbx-mcp Server
//!
//! MCP server exposing a Zabbix monitoring installation as tools, served
//! over a session-oriented Server-Sent Events transport.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zbx_server::init::{RunOptions, run};
//!
//! #[rocket::main]
//! async fn main() -> anyhow::Result<()> {
//!     run(RunOptions::default()).await
//! }
//! ```
//!
//! ## Architecture
//!
//! This crate implements the transport and protocol layer. It depends on the
//! domain contracts in `zbx-domain` and the configuration, logging and
//! upstream client in `zbx-infrastructure`.
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`McpServer`] | Main server struct |
//! | [`McpServerBuilder`] | Builder for server configuration |
//! | [`transport::StreamingTransport`] | Open, dispatch and close operations |
//! | [`session::SessionTable`] | Registry of live sessions |
//! | [`reaper::Reaper`] | Idle session eviction |
//! | [`tools::ToolRegistry`] | Tool catalog and invocation |

// Allow Rust 2024 compatibility issues from Rocket's route macros
#![allow(rust_2024_compatibility)]

pub mod args;
pub mod builder;
pub mod constants;
pub mod formatter;
pub mod handlers;
pub mod health;
pub mod init;
pub mod mcp_server;
pub mod reaper;
pub mod session;
pub mod tools;
pub mod transport;

// Re-export core types for public API
pub use builder::{BuilderError, McpServerBuilder};
pub use init::run;
pub use mcp_server::McpServer;
