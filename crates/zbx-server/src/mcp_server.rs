//! MCP Server Implementation
//!
//! Ties the session table, streaming transport, tool registry and reaper
//! together and builds the Rocket application that serves them.

use std::sync::Arc;

use rocket::{Build, Rocket};
use zbx_infrastructure::config::ServerConfig;

use crate::health::HealthState;
use crate::reaper::Reaper;
use crate::session::SessionTable;
use crate::tools::ToolRegistry;
use crate::transport::{StreamingTransport, mount};

/// Core MCP server
///
/// Owns the one session table shared by the transport and the reaper.
#[derive(Clone)]
pub struct McpServer {
    transport: StreamingTransport,
    reaper: Reaper,
    health: HealthState,
}

impl McpServer {
    /// Assemble a server from its parts
    pub fn new(transport: StreamingTransport, reaper: Reaper) -> Self {
        Self {
            transport,
            reaper,
            health: HealthState::new(),
        }
    }

    /// Streaming transport
    pub fn transport(&self) -> &StreamingTransport {
        &self.transport
    }

    /// Live sessions
    pub fn sessions(&self) -> &Arc<SessionTable> {
        self.transport.sessions()
    }

    /// Tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        self.transport.tools()
    }

    /// Idle session reaper
    pub fn reaper(&self) -> &Reaper {
        &self.reaper
    }

    /// Rocket application with default Rocket configuration
    pub fn rocket(&self) -> Rocket<Build> {
        mount(rocket::build(), self.transport.clone(), self.health.clone())
    }

    /// Rocket application bound to the configured address
    ///
    /// Rocket's own logging is silenced.
    pub fn rocket_with_config(&self, server: &ServerConfig) -> Rocket<Build> {
        let figment = rocket::Config::figment()
            .merge(("address", server.address()))
            .merge(("port", server.port))
            .merge(("log_level", "off"))
            .merge(("cli_colors", false));

        self.rocket().configure(figment)
    }
}
