//! Tool policy configuration

use serde::{Deserialize, Serialize};

/// Policy applied before any tool reaches the upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Reject every tool classified as mutating
    pub read_only: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self { read_only: true }
    }
}
