//! Tool error translation
//!
//! Every tool failure leaves the server as an `rmcp::ErrorData` whose `data`
//! names the failing tool.

use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;
use serde_json::json;
use zbx_domain::error::Error;

use super::name::ToolName;
use crate::constants::{JSONRPC_INTERNAL_ERROR, JSONRPC_POLICY_VIOLATION, JSONRPC_UPSTREAM_ERROR};

/// Error for `tool` with the given JSON-RPC code
pub fn tool_error(tool: ToolName, code: i32, message: impl Into<String>) -> McpError {
    McpError::new(
        ErrorCode(code),
        message.into(),
        Some(json!({ "tool": tool.as_str() })),
    )
}

/// A mutating tool was refused in read-only mode
pub fn policy_violation(tool: ToolName) -> McpError {
    let refusal = Error::policy(format!(
        "{tool} modifies monitoring data and the server is read-only"
    ));
    from_domain(tool, &refusal)
}

/// Map a domain error raised while running `tool`
pub fn from_domain(tool: ToolName, error: &Error) -> McpError {
    let code = match error {
        Error::PolicyViolation { .. } => JSONRPC_POLICY_VIOLATION,
        e if e.is_upstream() => JSONRPC_UPSTREAM_ERROR,
        _ => JSONRPC_INTERNAL_ERROR,
    };
    tool_error(tool, code, error.to_string())
}
