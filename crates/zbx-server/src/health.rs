//! Health reporting
//!
//! Snapshot served at `GET /health`.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{SERVER_NAME, SERVER_VERSION};
use crate::transport::StreamingTransport;

/// Process start times
#[derive(Debug, Clone)]
pub struct HealthState {
    started_at: DateTime<Utc>,
    started: Instant,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }
}

impl HealthState {
    /// Record the start time now
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a report for the current state of `transport`
    pub fn report(&self, transport: &StreamingTransport) -> HealthResponse {
        let auth = transport.gateway().auth_status();
        let sessions = transport.sessions().snapshot();
        HealthResponse {
            status: "ok",
            sessions: sessions.len(),
            oldest_session_created_at: sessions.iter().map(|session| session.created_at()).min(),
            upstream: UpstreamHealth {
                url: transport.gateway().endpoint().to_string(),
                authenticated: auth.authenticated,
                strategy: auth.strategy.map(|strategy| strategy.as_str()),
                last_error: auth.last_error,
            },
            read_only: transport.tools().read_only(),
            uptime_seconds: self.started.elapsed().as_secs(),
            started_at: self.started_at,
            version: SERVER_VERSION,
            name: SERVER_NAME,
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the server answers
    pub status: &'static str,
    /// Number of live sessions
    pub sessions: usize,
    /// Creation time of the longest-lived session
    pub oldest_session_created_at: Option<DateTime<Utc>>,
    /// Upstream connection state
    pub upstream: UpstreamHealth,
    /// Whether mutating tools are refused
    pub read_only: bool,
    /// Seconds since start
    pub uptime_seconds: u64,
    /// Wall-clock start time
    pub started_at: DateTime<Utc>,
    /// Server version
    pub version: &'static str,
    /// Server name
    pub name: &'static str,
}

/// Upstream part of the health report
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamHealth {
    /// Configured base URL
    pub url: String,
    /// Whether a usable login exists
    pub authenticated: bool,
    /// Strategy that last succeeded
    pub strategy: Option<&'static str>,
    /// Last authentication failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
