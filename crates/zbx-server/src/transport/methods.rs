//! JSON-RPC method handling
//!
//! # Supported Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | `initialize` | Server info and capabilities |
//! | `ping` | Liveness check, empty result |
//! | `tools/list` | Tool catalog |
//! | `tools/call` | Run a tool |
//! | `notifications/*` | Accepted, never answered |

use rmcp::ErrorData as McpError;
use rmcp::model::CallToolResult;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};
use zbx_domain::constants::MCP_PROTOCOL_VERSION;

use super::types::{McpRequest, McpResponse};
use crate::constants::{
    JSONRPC_INVALID_PARAMS, JSONRPC_METHOD_NOT_FOUND, SERVER_INSTRUCTIONS, SERVER_NAME,
    SERVER_VERSION,
};
use crate::tools::ToolRegistry;

/// Handle one request; `None` for notifications
pub async fn handle_request(tools: &ToolRegistry, request: &McpRequest) -> Option<McpResponse> {
    if request.is_notification() {
        debug!(method = %request.method, "Notification received");
        return None;
    }

    let id = request.id.clone();
    let response = match request.method.as_str() {
        "initialize" => McpResponse::success(id, initialize_result()),
        "ping" => McpResponse::success(id, json!({})),
        "tools/list" => McpResponse::success(id, tools.list_value()),
        "tools/call" => handle_tools_call(tools, request).await,
        other => McpResponse::error(
            id,
            JSONRPC_METHOD_NOT_FOUND,
            format!("Unknown method: {other}"),
        ),
    };
    Some(response)
}

/// Result of the `initialize` method
fn initialize_result() -> Value {
    json!({
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        },
        "instructions": SERVER_INSTRUCTIONS
    })
}

/// Parse tool call parameters from the request
fn parse_tool_call_params(
    params: &Map<String, Value>,
) -> Result<(String, Option<Map<String, Value>>), &'static str> {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or("Missing 'name' parameter for tools/call")?
        .to_string();

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => None,
        Some(Value::Object(arguments)) => Some(arguments.clone()),
        Some(_) => return Err("'arguments' must be an object"),
    };

    Ok((name, arguments))
}

/// Convert tool call result to JSON response
fn tool_result_to_json(result: CallToolResult) -> Value {
    let content_json: Vec<Value> = result
        .content
        .iter()
        .map(|content| {
            serde_json::to_value(content).unwrap_or(json!({
                "type": "text",
                "text": "Error serializing content"
            }))
        })
        .collect();

    json!({
        "content": content_json,
        "isError": result.is_error.unwrap_or(false)
    })
}

/// Turn a tool failure into a JSON-RPC error response
fn tool_error_response(id: Option<Value>, error: McpError) -> McpResponse {
    McpResponse::error_with_data(id, error.code.0, error.message, error.data)
}

/// Handle the `tools/call` method
async fn handle_tools_call(tools: &ToolRegistry, request: &McpRequest) -> McpResponse {
    let id = request.id.clone();
    let (name, arguments) = match parse_tool_call_params(&request.params_object()) {
        Ok(parsed) => parsed,
        Err(message) => return McpResponse::error(id, JSONRPC_INVALID_PARAMS, message),
    };

    match tools.invoke(&name, arguments).await {
        Ok(result) => McpResponse::success(id, tool_result_to_json(result)),
        Err(e) => {
            warn!(tool = %name, code = e.code.0, message = %e.message, "Tool call failed");
            tool_error_response(id, e)
        }
    }
}
