//! Response formatting utilities for MCP server
//!
//! Tool results are returned to clients as a single JSON text content block.

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};

use crate::tools::ToolName;

/// Response formatter for MCP server tools
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Format a record listing, keeping at most `limit` records
    pub fn format_records(
        tool: ToolName,
        records: Value,
        limit: Option<u32>,
    ) -> Result<CallToolResult, McpError> {
        let records = Self::truncate(records, limit);
        if let Value::Array(items) = &records {
            tracing::debug!(tool = %tool, count = items.len(), "Records returned");
        }
        Self::format_value(tool, &records)
    }

    /// Format the upstream result of a mutation
    pub fn format_mutation(tool: ToolName, result: &Value) -> Result<CallToolResult, McpError> {
        tracing::info!(tool = %tool, "Mutation applied");
        Self::format_value(tool, result)
    }

    /// Format the upstream API version
    pub fn format_version(version: &str) -> Result<CallToolResult, McpError> {
        Self::format_value(ToolName::ApiinfoVersion, &json!({ "version": version }))
    }

    /// Keep the first `limit` elements of an array; other values pass through
    pub fn truncate(records: Value, limit: Option<u32>) -> Value {
        match (records, limit) {
            (Value::Array(mut items), Some(limit)) => {
                items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
                Value::Array(items)
            }
            (records, _) => records,
        }
    }

    fn format_value(tool: ToolName, value: &Value) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value).map_err(|e| {
            McpError::internal_error(
                format!("Failed to serialize {tool} result: {e}"),
                Some(json!({ "tool": tool.as_str() })),
            )
        })?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
