//! Session lifecycle configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    SESSION_CHANNEL_CAPACITY, SESSION_IDLE_TIMEOUT_SECS, SESSION_SWEEP_INTERVAL_SECS,
};

/// Idle eviction and outbound queue sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds without inbound activity before a session is evicted
    pub idle_timeout_secs: u64,
    /// Seconds between idle-session sweeps
    pub sweep_interval_secs: u64,
    /// Messages buffered per session before writers wait
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: SESSION_IDLE_TIMEOUT_SECS,
            sweep_interval_secs: SESSION_SWEEP_INTERVAL_SECS,
            channel_capacity: SESSION_CHANNEL_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Idle timeout as a duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Sweep interval as a duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
