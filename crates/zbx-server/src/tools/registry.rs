//! Tool Registry Module
//!
//! Tool definitions, schema generation and the policy-checked entry point
//! used by `tools/list` and `tools/call`.

use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Tool};
use serde_json::{Map, Value, json};
use tracing::{info, warn};
use zbx_domain::ports::SharedUpstreamGateway;

use super::call::ToolCall;
use super::error::policy_violation;
use super::name::ToolName;
use super::router::{ToolHandlers, route_tool_call};
use crate::args::{
    ApiinfoVersionArgs, DashboardCreateArgs, DashboardGetArgs, EventAcknowledgeArgs,
    EventGetArgs, HistoryGetArgs, HostCreateArgs, HostDeleteArgs, HostGetArgs, HostUpdateArgs,
    HostgroupGetArgs, ItemCreateArgs, ItemGetArgs, MaintenanceGetArgs, ProblemGetArgs,
    TemplateGetArgs, TriggerCreateArgs, TriggerGetArgs,
};

/// Tool definitions for MCP protocol
pub struct ToolDefinitions;

impl ToolDefinitions {
    /// Definition of one tool
    pub fn definition(tool: ToolName) -> Result<Tool, McpError> {
        let schema = match tool {
            ToolName::HostGet => schemars::schema_for!(HostGetArgs),
            ToolName::HostCreate => schemars::schema_for!(HostCreateArgs),
            ToolName::HostUpdate => schemars::schema_for!(HostUpdateArgs),
            ToolName::HostDelete => schemars::schema_for!(HostDeleteArgs),
            ToolName::HostgroupGet => schemars::schema_for!(HostgroupGetArgs),
            ToolName::ItemGet => schemars::schema_for!(ItemGetArgs),
            ToolName::ItemCreate => schemars::schema_for!(ItemCreateArgs),
            ToolName::TriggerGet => schemars::schema_for!(TriggerGetArgs),
            ToolName::TriggerCreate => schemars::schema_for!(TriggerCreateArgs),
            ToolName::ProblemGet => schemars::schema_for!(ProblemGetArgs),
            ToolName::EventGet => schemars::schema_for!(EventGetArgs),
            ToolName::EventAcknowledge => schemars::schema_for!(EventAcknowledgeArgs),
            ToolName::HistoryGet => schemars::schema_for!(HistoryGetArgs),
            ToolName::TemplateGet => schemars::schema_for!(TemplateGetArgs),
            ToolName::DashboardGet => schemars::schema_for!(DashboardGetArgs),
            ToolName::DashboardCreate => schemars::schema_for!(DashboardCreateArgs),
            ToolName::MaintenanceGet => schemars::schema_for!(MaintenanceGetArgs),
            ToolName::ApiinfoVersion => schemars::schema_for!(ApiinfoVersionArgs),
        };
        Self::create_tool(tool, schema)
    }

    /// Create a tool from schema
    fn create_tool(tool: ToolName, schema: schemars::Schema) -> Result<Tool, McpError> {
        let schema_value = serde_json::to_value(schema)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let input_schema = schema_value
            .as_object()
            .ok_or_else(|| {
                McpError::internal_error(format!("Schema for {tool} is not an object"), None)
            })?
            .clone();

        Ok(Tool::new(
            tool.as_str(),
            tool.description(),
            Arc::new(input_schema),
        ))
    }
}

/// Create the complete list of available tools
pub fn create_tool_list() -> Result<Vec<Tool>, McpError> {
    ToolName::ALL
        .into_iter()
        .map(ToolDefinitions::definition)
        .collect()
}

/// Catalog plus policy-checked invocation
pub struct ToolRegistry {
    tools: Vec<Tool>,
    handlers: ToolHandlers,
    read_only: bool,
}

impl ToolRegistry {
    /// Build the registry over `gateway`
    pub fn new(gateway: &SharedUpstreamGateway, read_only: bool) -> Result<Self, McpError> {
        Ok(Self {
            tools: create_tool_list()?,
            handlers: ToolHandlers::new(gateway),
            read_only,
        })
    }

    /// Tool catalog
    pub fn list(&self) -> &[Tool] {
        &self.tools
    }

    /// Catalog rendered as the `tools/list` result
    pub fn list_value(&self) -> Value {
        json!({ "tools": self.tools })
    }

    /// Whether mutating tools are refused
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Parse, policy-check and run a tool call
    ///
    /// In read-only mode mutating tools are refused before their arguments
    /// are parsed.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, McpError> {
        let tool = name.parse::<ToolName>().map_err(|e| {
            McpError::invalid_params(e.to_string(), Some(json!({ "tool": name })))
        })?;

        if self.read_only && tool.is_mutating() {
            warn!(tool = %tool, "Mutating tool refused in read-only mode");
            return Err(policy_violation(tool));
        }

        let call = ToolCall::parse(tool, arguments)?;
        info!(tool = %tool, "Tool call");
        route_tool_call(call, &self.handlers).await
    }
}
