//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, PolicyConfig, ServerConfig, SessionConfig, UpstreamConfig};

/// Root configuration
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8080
///
/// [upstream]
/// url = "https://monitoring.example.com/zabbix"
/// token = "..."
///
/// [policy]
/// read_only = true
///
/// [sessions]
/// idle_timeout_secs = 1800
/// sweep_interval_secs = 300
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
    /// Monitoring API connection
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Tool invocation policy
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Session lifecycle tuning
    #[serde(default)]
    pub sessions: SessionConfig,
    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}
