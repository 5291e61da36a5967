//! MCP tool handlers
//!
//! Handlers grouped by monitoring area. Each one turns typed arguments into
//! upstream request parameters and formats the result.

pub mod apiinfo;
pub mod catalog;
pub mod events;
pub mod hosts;
pub mod items;

pub use apiinfo::ApiinfoHandler;
pub use catalog::CatalogHandler;
pub use events::EventHandler;
pub use hosts::HostHandler;
pub use items::ItemHandler;

use std::time::Instant;

use rmcp::ErrorData as McpError;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use zbx_domain::ports::UpstreamGateway;

use crate::tools::ToolName;
use crate::tools::error::from_domain;

/// Upstream request parameters
#[derive(Debug, Clone, Default)]
pub(crate) struct Params(Map<String, Value>);

impl Params {
    /// Parameters of a `*.get` call returning full records
    pub(crate) fn extend() -> Self {
        Self::default().set("output", "extend")
    }

    /// Set a parameter
    pub(crate) fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Set a parameter when a value is present
    pub(crate) fn set_opt<T: Into<Value>>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Invoke the upstream method behind `tool`
pub(crate) async fn call_upstream(
    gateway: &dyn UpstreamGateway,
    tool: ToolName,
    params: Value,
) -> Result<Value, McpError> {
    let method = tool.upstream_method();
    let timer = Instant::now();
    match gateway.call(method, params).await {
        Ok(result) => {
            debug!(tool = %tool, method, elapsed_ms = timer.elapsed().as_millis(), "Upstream call succeeded");
            Ok(result)
        }
        Err(e) => {
            warn!(tool = %tool, method, error = %e, "Upstream call failed");
            Err(from_domain(tool, &e))
        }
    }
}
