//! Tool argument types for MCP server
//!
//! One record per tool. Each record is deserialized from the call's
//! `arguments`, validated, and described to clients through its generated
//! JSON Schema.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Upper bound accepted for `limit`
pub const MAX_LIMIT: u32 = 10_000;

/// Arguments for the host_get tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for listing monitored hosts")]
pub struct HostGetArgs {
    /// Only hosts with these ids
    pub hostids: Option<Vec<String>>,
    /// Only hosts belonging to these host groups
    pub groupids: Option<Vec<String>>,
    /// Substring matched against the technical or visible host name
    #[validate(length(min = 1, max = 255, message = "Search must be between 1 and 255 characters"))]
    pub search: Option<String>,
    /// Maximum number of hosts to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the host_create tool
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for creating a host")]
pub struct HostCreateArgs {
    /// Technical host name
    #[validate(length(min = 1, max = 128, message = "Host name must be between 1 and 128 characters"))]
    pub host: String,
    /// Visible host name
    pub name: Option<String>,
    /// Host groups to add the host to (at least one)
    #[validate(length(min = 1, message = "At least one host group is required"))]
    pub groupids: Vec<String>,
    /// Templates to link
    pub templateids: Option<Vec<String>>,
    /// Host interfaces as accepted by the upstream API
    pub interfaces: Option<Vec<Value>>,
    /// Free-form description
    pub description: Option<String>,
}

/// Arguments for the host_update tool
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for updating a host")]
pub struct HostUpdateArgs {
    /// Id of the host to update
    #[validate(length(min = 1, message = "Host id cannot be empty"))]
    pub hostid: String,
    /// New technical host name
    pub host: Option<String>,
    /// New visible host name
    pub name: Option<String>,
    /// 0 = monitored, 1 = unmonitored
    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: Option<u8>,
    /// New description
    pub description: Option<String>,
}

/// Arguments for the host_delete tool
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for deleting hosts")]
pub struct HostDeleteArgs {
    /// Ids of the hosts to delete
    #[validate(length(min = 1, message = "At least one host id is required"))]
    pub hostids: Vec<String>,
}

/// Arguments for the hostgroup_get tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for listing host groups")]
pub struct HostgroupGetArgs {
    /// Only groups with these ids
    pub groupids: Option<Vec<String>>,
    /// Substring matched against the group name
    pub search: Option<String>,
    /// Maximum number of groups to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the item_get tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for listing items")]
pub struct ItemGetArgs {
    /// Only items with these ids
    pub itemids: Option<Vec<String>>,
    /// Only items of these hosts
    pub hostids: Option<Vec<String>>,
    /// Substring matched against the item key
    pub search: Option<String>,
    /// Maximum number of items to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the item_create tool
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for creating an item")]
pub struct ItemCreateArgs {
    /// Host the item belongs to
    #[validate(length(min = 1, message = "Host id cannot be empty"))]
    pub hostid: String,
    /// Item name
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    /// Item key, e.g. `system.cpu.load[all,avg1]`
    #[validate(length(min = 1, max = 2048, message = "Key must be between 1 and 2048 characters"))]
    pub key_: String,
    /// Item type (0 = agent, 2 = trapper, 7 = active agent, ...)
    #[serde(rename = "type")]
    pub item_type: u8,
    /// Value type (0 = float, 1 = character, 2 = log, 3 = unsigned, 4 = text)
    #[validate(range(min = 0, max = 4, message = "Value type must be between 0 and 4"))]
    pub value_type: u8,
    /// Update interval, e.g. `1m`
    pub delay: Option<String>,
    /// Host interface used for polling
    pub interfaceid: Option<String>,
    /// Value units
    pub units: Option<String>,
}

/// Arguments for the trigger_get tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for listing triggers")]
pub struct TriggerGetArgs {
    /// Only triggers with these ids
    pub triggerids: Option<Vec<String>>,
    /// Only triggers of these hosts
    pub hostids: Option<Vec<String>>,
    /// Only triggers currently in problem state
    pub only_problems: Option<bool>,
    /// Minimum severity (0 = not classified ... 5 = disaster)
    #[validate(range(min = 0, max = 5, message = "Severity must be between 0 and 5"))]
    pub min_severity: Option<u8>,
    /// Maximum number of triggers to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the trigger_create tool
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for creating a trigger")]
pub struct TriggerCreateArgs {
    /// Trigger name
    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    pub description: String,
    /// Trigger expression
    #[validate(length(min = 1, message = "Expression cannot be empty"))]
    pub expression: String,
    /// Severity (0 = not classified ... 5 = disaster)
    #[validate(range(min = 0, max = 5, message = "Priority must be between 0 and 5"))]
    pub priority: Option<u8>,
    /// Operator comments
    pub comments: Option<String>,
}

/// Arguments for the problem_get tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for listing current problems")]
pub struct ProblemGetArgs {
    /// Only problems of these hosts
    pub hostids: Option<Vec<String>>,
    /// Only problems with these severities (0-5)
    pub severities: Option<Vec<u8>>,
    /// Include problems resolved recently
    pub recent: Option<bool>,
    /// Maximum number of problems to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the event_get tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for listing events")]
pub struct EventGetArgs {
    /// Only events with these ids
    pub eventids: Option<Vec<String>>,
    /// Only events of these hosts
    pub hostids: Option<Vec<String>>,
    /// Unix timestamp of the earliest event
    pub time_from: Option<i64>,
    /// Unix timestamp of the latest event
    pub time_till: Option<i64>,
    /// Maximum number of events to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the event_acknowledge tool
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for acknowledging events")]
pub struct EventAcknowledgeArgs {
    /// Events to acknowledge
    #[validate(length(min = 1, message = "At least one event id is required"))]
    pub eventids: Vec<String>,
    /// Message attached to the acknowledgement
    #[validate(length(max = 2048, message = "Message cannot exceed 2048 characters"))]
    pub message: Option<String>,
    /// Also close the problem
    #[serde(default)]
    pub close: bool,
}

/// Arguments for the history_get tool
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for reading item history")]
pub struct HistoryGetArgs {
    /// Items to read history for
    #[validate(length(min = 1, message = "At least one item id is required"))]
    pub itemids: Vec<String>,
    /// History value type (0 = float, 1 = character, 2 = log, 3 = unsigned, 4 = text)
    #[validate(range(min = 0, max = 4, message = "History type must be between 0 and 4"))]
    pub history: Option<u8>,
    /// Unix timestamp of the earliest value
    pub time_from: Option<i64>,
    /// Unix timestamp of the latest value
    pub time_till: Option<i64>,
    /// Maximum number of values to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the template_get tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for listing templates")]
pub struct TemplateGetArgs {
    /// Only templates with these ids
    pub templateids: Option<Vec<String>>,
    /// Substring matched against the template name
    pub search: Option<String>,
    /// Maximum number of templates to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the dashboard_get tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for listing dashboards")]
pub struct DashboardGetArgs {
    /// Only dashboards with these ids
    pub dashboardids: Option<Vec<String>>,
    /// Maximum number of dashboards to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the dashboard_create tool
#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for creating a dashboard")]
pub struct DashboardCreateArgs {
    /// Dashboard name
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    /// Dashboard pages with their widgets; one empty page when omitted
    pub pages: Option<Vec<Value>>,
    /// Seconds each page is shown in slideshow mode
    pub display_period: Option<u32>,
    /// Start the slideshow automatically
    pub auto_start: Option<bool>,
}

/// Arguments for the maintenance_get tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "Parameters for listing maintenance periods")]
pub struct MaintenanceGetArgs {
    /// Only maintenance periods with these ids
    pub maintenanceids: Option<Vec<String>>,
    /// Only maintenance periods covering these hosts
    pub hostids: Option<Vec<String>>,
    /// Maximum number of maintenance periods to return
    #[validate(range(min = 1, max = 10000, message = "Limit must be between 1 and 10000"))]
    pub limit: Option<u32>,
}

/// Arguments for the apiinfo_version tool
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, Validate)]
#[schemars(description = "No parameters")]
pub struct ApiinfoVersionArgs {}
