//! Transport layer types
//!
//! JSON-RPC envelopes exchanged with clients, plus the acknowledgement and
//! error bodies returned by the HTTP front door.

use serde::Serialize;
use serde_json::{Map, Value};
use zbx_domain::constants::JSONRPC_VERSION;

use super::error::TransportError;
use crate::session::SessionId;

/// Prefix of methods that never produce a response
const NOTIFICATION_PREFIX: &str = "notifications/";

/// MCP request payload (JSON-RPC format), validated at the boundary
#[derive(Debug, Clone, PartialEq)]
pub struct McpRequest {
    /// JSON-RPC method
    pub method: String,
    /// Request parameters
    pub params: Option<Value>,
    /// Caller correlation id; absent only for notifications
    pub id: Option<Value>,
}

impl McpRequest {
    /// Validate a raw body as a JSON-RPC 2.0 request
    pub fn from_value(body: Value) -> Result<Self, TransportError> {
        let Value::Object(mut envelope) = body else {
            return Err(TransportError::malformed("request body must be a JSON object"));
        };

        match envelope.get("jsonrpc").and_then(Value::as_str) {
            Some(JSONRPC_VERSION) => {}
            Some(other) => {
                return Err(TransportError::malformed(format!(
                    "unsupported jsonrpc version {other:?}"
                )));
            }
            None => return Err(TransportError::malformed("missing jsonrpc version")),
        }

        let method = match envelope.remove("method") {
            Some(Value::String(method)) if !method.trim().is_empty() => method,
            Some(_) => return Err(TransportError::malformed("method must be a non-empty string")),
            None => return Err(TransportError::malformed("missing method")),
        };

        let params = match envelope.remove("params") {
            None | Some(Value::Null) => None,
            Some(params @ (Value::Object(_) | Value::Array(_))) => Some(params),
            Some(_) => return Err(TransportError::malformed("params must be an object or array")),
        };

        let id = match envelope.remove("id") {
            None => None,
            Some(id @ (Value::String(_) | Value::Number(_))) => Some(id),
            Some(_) => return Err(TransportError::malformed("id must be a string or number")),
        };

        let request = Self { method, params, id };
        if request.id.is_none() && !request.is_notification() {
            return Err(TransportError::malformed(format!(
                "request id is required for {}",
                request.method
            )));
        }
        Ok(request)
    }

    /// Whether the method expects no response
    pub fn is_notification(&self) -> bool {
        self.method.starts_with(NOTIFICATION_PREFIX)
    }

    /// Params as an object, treating absence as empty
    pub fn params_object(&self) -> Map<String, Value> {
        match &self.params {
            Some(Value::Object(params)) => params.clone(),
            _ => Map::new(),
        }
    }
}

/// MCP response payload (JSON-RPC format)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct McpResponse {
    /// JSON-RPC version
    pub jsonrpc: &'static str,
    /// Response result (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    /// Request ID
    pub id: Option<Value>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Structured detail, e.g. the failing tool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpResponse {
    /// Create a success response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self::error_with_data(id, code, message, None)
    }

    /// Create an error response carrying structured detail
    pub fn error_with_data(
        id: Option<Value>,
        code: i32,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data,
            }),
            id,
        }
    }

    /// Serialize for the event stream
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Routing acknowledgement for `POST /messages`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchAck {
    /// Always `true`; failures are reported as errors instead
    pub accepted: bool,
    /// Session the call was routed to
    pub session_id: SessionId,
    /// Correlation id echoed from the request
    pub id: Option<Value>,
}

/// Body of `DELETE /sessions/<id>`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloseResponse {
    /// Id as supplied by the caller
    pub session_id: String,
    /// Whether this request closed a live session
    pub closed: bool,
}

/// Structured error body: `{"error": {"kind", "message", "tool"?}}`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorBody {
    /// Error detail
    pub error: ErrorDetail,
}

/// Inner error detail
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorDetail {
    /// Machine-readable category
    pub kind: &'static str,
    /// Human-readable message
    pub message: String,
    /// Failing tool, when one was involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

impl ErrorBody {
    /// Error body without a tool
    pub fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                kind,
                message: message.into(),
                tool: None,
            },
        }
    }
}
