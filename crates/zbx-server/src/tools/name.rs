//! Tool names
//!
//! The closed set of tools the server exposes, with the upstream method each
//! one drives and whether it changes upstream state.

use std::fmt;
use std::str::FromStr;

/// A tool exposed through `tools/list` and `tools/call`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    HostGet,
    HostCreate,
    HostUpdate,
    HostDelete,
    HostgroupGet,
    ItemGet,
    ItemCreate,
    TriggerGet,
    TriggerCreate,
    ProblemGet,
    EventGet,
    EventAcknowledge,
    HistoryGet,
    TemplateGet,
    DashboardGet,
    DashboardCreate,
    MaintenanceGet,
    ApiinfoVersion,
}

/// The name does not match any tool
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl ToolName {
    /// Every tool, in catalog order
    pub const ALL: [Self; 18] = [
        Self::HostGet,
        Self::HostCreate,
        Self::HostUpdate,
        Self::HostDelete,
        Self::HostgroupGet,
        Self::ItemGet,
        Self::ItemCreate,
        Self::TriggerGet,
        Self::TriggerCreate,
        Self::ProblemGet,
        Self::EventGet,
        Self::EventAcknowledge,
        Self::HistoryGet,
        Self::TemplateGet,
        Self::DashboardGet,
        Self::DashboardCreate,
        Self::MaintenanceGet,
        Self::ApiinfoVersion,
    ];

    /// Wire name used by MCP clients
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HostGet => "host_get",
            Self::HostCreate => "host_create",
            Self::HostUpdate => "host_update",
            Self::HostDelete => "host_delete",
            Self::HostgroupGet => "hostgroup_get",
            Self::ItemGet => "item_get",
            Self::ItemCreate => "item_create",
            Self::TriggerGet => "trigger_get",
            Self::TriggerCreate => "trigger_create",
            Self::ProblemGet => "problem_get",
            Self::EventGet => "event_get",
            Self::EventAcknowledge => "event_acknowledge",
            Self::HistoryGet => "history_get",
            Self::TemplateGet => "template_get",
            Self::DashboardGet => "dashboard_get",
            Self::DashboardCreate => "dashboard_create",
            Self::MaintenanceGet => "maintenance_get",
            Self::ApiinfoVersion => "apiinfo_version",
        }
    }

    /// Upstream API method invoked by this tool
    pub fn upstream_method(&self) -> &'static str {
        match self {
            Self::HostGet => "host.get",
            Self::HostCreate => "host.create",
            Self::HostUpdate => "host.update",
            Self::HostDelete => "host.delete",
            Self::HostgroupGet => "hostgroup.get",
            Self::ItemGet => "item.get",
            Self::ItemCreate => "item.create",
            Self::TriggerGet => "trigger.get",
            Self::TriggerCreate => "trigger.create",
            Self::ProblemGet => "problem.get",
            Self::EventGet => "event.get",
            Self::EventAcknowledge => "event.acknowledge",
            Self::HistoryGet => "history.get",
            Self::TemplateGet => "template.get",
            Self::DashboardGet => "dashboard.get",
            Self::DashboardCreate => "dashboard.create",
            Self::MaintenanceGet => "maintenance.get",
            Self::ApiinfoVersion => "apiinfo.version",
        }
    }

    /// Whether the tool changes upstream state
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::HostCreate
                | Self::HostUpdate
                | Self::HostDelete
                | Self::ItemCreate
                | Self::TriggerCreate
                | Self::EventAcknowledge
                | Self::DashboardCreate
        )
    }

    /// Human-readable description shown in the catalog
    pub fn description(&self) -> &'static str {
        match self {
            Self::HostGet => "List monitored hosts, optionally filtered by id, group or name",
            Self::HostCreate => "Create a host in one or more host groups",
            Self::HostUpdate => "Update the name, status or description of a host",
            Self::HostDelete => "Delete hosts by id",
            Self::HostgroupGet => "List host groups",
            Self::ItemGet => "List items, optionally filtered by host or key",
            Self::ItemCreate => "Create an item on a host",
            Self::TriggerGet => "List triggers, optionally only those in problem state",
            Self::TriggerCreate => "Create a trigger from an expression",
            Self::ProblemGet => "List current problems",
            Self::EventGet => "List events in a time range",
            Self::EventAcknowledge => "Acknowledge events, optionally with a message or closing them",
            Self::HistoryGet => "Read collected values of items",
            Self::TemplateGet => "List templates",
            Self::DashboardGet => "List dashboards",
            Self::DashboardCreate => "Create a dashboard",
            Self::MaintenanceGet => "List maintenance periods",
            Self::ApiinfoVersion => "Report the version of the monitoring API",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}
