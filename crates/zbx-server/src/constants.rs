//! Server-specific constants
//!
//! Contains constants specific to the MCP server implementation,
//! including JSON-RPC error codes and protocol-related values.

// ============================================================================
// JSON-RPC ERROR CODES (Standard)
// ============================================================================

/// JSON-RPC Method not found error code
pub const JSONRPC_METHOD_NOT_FOUND: i32 = -32601;

/// JSON-RPC Invalid request error code
pub const JSONRPC_INVALID_REQUEST: i32 = -32600;

/// JSON-RPC Invalid params error code
pub const JSONRPC_INVALID_PARAMS: i32 = -32602;

/// JSON-RPC Internal error code
pub const JSONRPC_INTERNAL_ERROR: i32 = -32603;

// ============================================================================
// JSON-RPC ERROR CODES (Server-defined range)
// ============================================================================

/// A tool was refused by local policy (read-only mode)
pub const JSONRPC_POLICY_VIOLATION: i32 = -32001;

/// The upstream API rejected, failed or could not be reached
pub const JSONRPC_UPSTREAM_ERROR: i32 = -32002;

// ============================================================================
// SSE EVENTS
// ============================================================================

/// Event name of the first message on every stream
pub const SSE_EVENT_SESSION: &str = "session";

/// Event name of JSON-RPC responses
pub const SSE_EVENT_MESSAGE: &str = "message";

/// Event name of the notice sent before a server-side close
pub const SSE_EVENT_CLOSED: &str = "session_closed";

// ============================================================================
// SESSION ADDRESSING
// ============================================================================

/// Query parameters that may carry the session id, in lookup order
pub const SESSION_QUERY_PARAMS: &[&str] = &["sessionId", "session_id"];

/// Headers that may carry the session id, in lookup order
pub const SESSION_HEADERS: &[&str] = &["Mcp-Session-Id", "X-Session-Id"];

// ============================================================================
// SERVER IDENTITY
// ============================================================================

/// Name announced by `initialize` and `/health`
pub const SERVER_NAME: &str = "zbx-mcp";

/// Version announced by `initialize` and `/health`
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Instructions returned by `initialize`
pub const SERVER_INSTRUCTIONS: &str = "Tools for querying and managing a Zabbix monitoring \
     installation. Read-only tools end in _get; mutating tools are refused while the server \
     runs in read-only mode.";
