//! HTTP server configuration

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HTTP_PORT, DEFAULT_SERVER_HOST};

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

impl ServerConfig {
    /// Parsed bind address, falling back to loopback
    pub fn address(&self) -> IpAddr {
        self.host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}
