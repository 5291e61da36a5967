//! Upstream API Gateway Port
//!
//! Authenticated request/response access to the monitoring platform's
//! JSON-RPC management API.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::value_objects::AuthStatus;

/// Authenticated caller of the monitoring API
///
/// Implementations own the process-wide login identity. Concurrent callers
/// must share a single in-flight login rather than racing to authenticate.
#[async_trait]
pub trait UpstreamGateway: Send + Sync {
    /// Invoke an API method (e.g. `host.get`) and return its `result` member
    async fn call(&self, method: &str, params: Value) -> Result<Value>;

    /// Make sure a usable login exists, performing it if necessary
    async fn ensure_authenticated(&self) -> Result<()>;

    /// Current authentication state
    fn auth_status(&self) -> AuthStatus;

    /// Upstream API version string (unauthenticated)
    async fn api_version(&self) -> Result<String> {
        let value = self.call("apiinfo.version", Value::Array(Vec::new())).await?;
        Ok(value
            .as_str()
            .map_or_else(|| value.to_string(), ToString::to_string))
    }

    /// Base URL used for display in health output
    fn endpoint(&self) -> &str;
}

/// Shared gateway handle
pub type SharedUpstreamGateway = Arc<dyn UpstreamGateway>;
