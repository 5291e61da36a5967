//! MCP Server Builder
//!
//! Builder pattern for constructing MCP servers with dependency injection.
//! Ensures the upstream gateway is provided before server construction.

use std::sync::Arc;

use zbx_domain::ports::SharedUpstreamGateway;
use zbx_infrastructure::config::SessionConfig;

use crate::McpServer;
use crate::reaper::Reaper;
use crate::session::SessionTable;
use crate::tools::ToolRegistry;
use crate::transport::StreamingTransport;

/// Builder for MCP Server with dependency injection
pub struct McpServerBuilder {
    gateway: Option<SharedUpstreamGateway>,
    sessions: Option<Arc<SessionTable>>,
    session_config: SessionConfig,
    read_only: bool,
}

impl Default for McpServerBuilder {
    fn default() -> Self {
        Self {
            gateway: None,
            sessions: None,
            session_config: SessionConfig::default(),
            read_only: true,
        }
    }
}

impl McpServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upstream gateway
    ///
    /// # Arguments
    /// * `gateway` - Implementation of the upstream gateway port
    pub fn with_gateway(mut self, gateway: SharedUpstreamGateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Refuse mutating tools (the default)
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Session limits and reaper timing
    pub fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Share an existing session table
    pub fn with_sessions(mut self, sessions: Arc<SessionTable>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Build the MCP server
    ///
    /// # Errors
    /// Returns `BuilderError::MissingDependency` if the gateway is not provided
    pub fn build(self) -> Result<McpServer, BuilderError> {
        let gateway = self
            .gateway
            .ok_or(BuilderError::MissingDependency("upstream gateway"))?;
        let sessions = self.sessions.unwrap_or_default();

        let tools = ToolRegistry::new(&gateway, self.read_only)
            .map_err(|e| BuilderError::ToolCatalog(e.message.to_string()))?;
        let transport = StreamingTransport::new(
            Arc::clone(&sessions),
            Arc::new(tools),
            gateway,
            self.session_config.channel_capacity,
        );
        let reaper = Reaper::new(
            sessions,
            self.session_config.idle_timeout(),
            self.session_config.sweep_interval(),
        );

        Ok(McpServer::new(transport, reaper))
    }
}

/// Errors that can occur during server building
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// A required dependency was not provided
    #[error("Missing required dependency: {0}")]
    MissingDependency(&'static str),

    /// The tool catalog could not be generated
    #[error("Failed to build tool catalog: {0}")]
    ToolCatalog(String),
}
