//! Domain layer constants
//!
//! Protocol-level values shared between the transport and the upstream
//! client. Infrastructure-specific defaults live in
//! `zbx_infrastructure::constants`.

// ============================================================================
// JSON-RPC PROTOCOL
// ============================================================================

/// JSON-RPC protocol version marker carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version announced by `initialize`
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

// ============================================================================
// UPSTREAM API
// ============================================================================

/// Path of the JSON-RPC endpoint on the monitoring frontend
pub const UPSTREAM_API_PATH: &str = "api_jsonrpc.php";

/// Upstream methods that must never carry credentials
pub const UNAUTHENTICATED_METHODS: &[&str] = &["apiinfo.version", "user.login"];

/// Maximum authentication attempts for a single upstream call
pub const MAX_AUTH_ATTEMPTS: usize = 3;

/// Substrings of upstream error texts that signal an expired or rejected login
pub const UPSTREAM_AUTH_ERROR_MARKERS: &[&str] = &[
    "not authorised",
    "not authorized",
    "session terminated",
    "re-login",
    "api token expired",
    "incorrect user name or password",
];
