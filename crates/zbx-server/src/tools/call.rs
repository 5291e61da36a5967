//! Boundary parsing of tool calls
//!
//! Turns a `(name, arguments)` pair from `tools/call` into a typed,
//! validated [`ToolCall`] before anything is invoked.

use rmcp::ErrorData as McpError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::Validate;

use super::name::ToolName;
use crate::args::{
    ApiinfoVersionArgs, DashboardCreateArgs, DashboardGetArgs, EventAcknowledgeArgs,
    EventGetArgs, HistoryGetArgs, HostCreateArgs, HostDeleteArgs, HostGetArgs, HostUpdateArgs,
    HostgroupGetArgs, ItemCreateArgs, ItemGetArgs, MaintenanceGetArgs, ProblemGetArgs,
    TemplateGetArgs, TriggerCreateArgs, TriggerGetArgs,
};

/// A parsed tool invocation
#[derive(Debug, Clone)]
pub enum ToolCall {
    HostGet(HostGetArgs),
    HostCreate(HostCreateArgs),
    HostUpdate(HostUpdateArgs),
    HostDelete(HostDeleteArgs),
    HostgroupGet(HostgroupGetArgs),
    ItemGet(ItemGetArgs),
    ItemCreate(ItemCreateArgs),
    TriggerGet(TriggerGetArgs),
    TriggerCreate(TriggerCreateArgs),
    ProblemGet(ProblemGetArgs),
    EventGet(EventGetArgs),
    EventAcknowledge(EventAcknowledgeArgs),
    HistoryGet(HistoryGetArgs),
    TemplateGet(TemplateGetArgs),
    DashboardGet(DashboardGetArgs),
    DashboardCreate(DashboardCreateArgs),
    MaintenanceGet(MaintenanceGetArgs),
    ApiinfoVersion(ApiinfoVersionArgs),
}

impl ToolCall {
    /// Deserialize and validate the arguments for `tool`
    pub fn parse(tool: ToolName, arguments: Option<Map<String, Value>>) -> Result<Self, McpError> {
        let arguments = Value::Object(arguments.unwrap_or_default());
        let call = match tool {
            ToolName::HostGet => Self::HostGet(parse_args(tool, arguments)?),
            ToolName::HostCreate => Self::HostCreate(parse_args(tool, arguments)?),
            ToolName::HostUpdate => Self::HostUpdate(parse_args(tool, arguments)?),
            ToolName::HostDelete => Self::HostDelete(parse_args(tool, arguments)?),
            ToolName::HostgroupGet => Self::HostgroupGet(parse_args(tool, arguments)?),
            ToolName::ItemGet => Self::ItemGet(parse_args(tool, arguments)?),
            ToolName::ItemCreate => Self::ItemCreate(parse_args(tool, arguments)?),
            ToolName::TriggerGet => Self::TriggerGet(parse_args(tool, arguments)?),
            ToolName::TriggerCreate => Self::TriggerCreate(parse_args(tool, arguments)?),
            ToolName::ProblemGet => Self::ProblemGet(parse_args(tool, arguments)?),
            ToolName::EventGet => Self::EventGet(parse_args(tool, arguments)?),
            ToolName::EventAcknowledge => Self::EventAcknowledge(parse_args(tool, arguments)?),
            ToolName::HistoryGet => Self::HistoryGet(parse_args(tool, arguments)?),
            ToolName::TemplateGet => Self::TemplateGet(parse_args(tool, arguments)?),
            ToolName::DashboardGet => Self::DashboardGet(parse_args(tool, arguments)?),
            ToolName::DashboardCreate => Self::DashboardCreate(parse_args(tool, arguments)?),
            ToolName::MaintenanceGet => Self::MaintenanceGet(parse_args(tool, arguments)?),
            ToolName::ApiinfoVersion => Self::ApiinfoVersion(parse_args(tool, arguments)?),
        };
        Ok(call)
    }

    /// Tool this call targets
    pub fn tool(&self) -> ToolName {
        match self {
            Self::HostGet(_) => ToolName::HostGet,
            Self::HostCreate(_) => ToolName::HostCreate,
            Self::HostUpdate(_) => ToolName::HostUpdate,
            Self::HostDelete(_) => ToolName::HostDelete,
            Self::HostgroupGet(_) => ToolName::HostgroupGet,
            Self::ItemGet(_) => ToolName::ItemGet,
            Self::ItemCreate(_) => ToolName::ItemCreate,
            Self::TriggerGet(_) => ToolName::TriggerGet,
            Self::TriggerCreate(_) => ToolName::TriggerCreate,
            Self::ProblemGet(_) => ToolName::ProblemGet,
            Self::EventGet(_) => ToolName::EventGet,
            Self::EventAcknowledge(_) => ToolName::EventAcknowledge,
            Self::HistoryGet(_) => ToolName::HistoryGet,
            Self::TemplateGet(_) => ToolName::TemplateGet,
            Self::DashboardGet(_) => ToolName::DashboardGet,
            Self::DashboardCreate(_) => ToolName::DashboardCreate,
            Self::MaintenanceGet(_) => ToolName::MaintenanceGet,
            Self::ApiinfoVersion(_) => ToolName::ApiinfoVersion,
        }
    }
}

/// Parse request arguments into the expected type and validate them
fn parse_args<T>(tool: ToolName, arguments: Value) -> Result<T, McpError>
where
    T: DeserializeOwned + Validate,
{
    let args: T = serde_json::from_value(arguments).map_err(|e| {
        McpError::invalid_params(
            format!("Invalid arguments for {tool}: {e}"),
            Some(json!({ "tool": tool.as_str() })),
        )
    })?;
    args.validate().map_err(|e| {
        McpError::invalid_params(
            format!("Invalid arguments for {tool}: {e}"),
            Some(json!({ "tool": tool.as_str() })),
        )
    })?;
    Ok(args)
}
