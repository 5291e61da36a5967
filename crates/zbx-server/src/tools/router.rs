//! Tool Router Module
//!
//! Routes parsed tool calls to the handler for their monitoring area.

use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::model::CallToolResult;
use tracing::debug;
use zbx_domain::ports::SharedUpstreamGateway;

use super::call::ToolCall;
use crate::handlers::{ApiinfoHandler, CatalogHandler, EventHandler, HostHandler, ItemHandler};

/// Handler references for tool routing
pub struct ToolHandlers {
    /// Hosts and host groups
    pub hosts: Arc<HostHandler>,
    /// Items and history
    pub items: Arc<ItemHandler>,
    /// Triggers, problems and events
    pub events: Arc<EventHandler>,
    /// Templates, dashboards and maintenance periods
    pub catalog: Arc<CatalogHandler>,
    /// API information
    pub apiinfo: Arc<ApiinfoHandler>,
}

impl ToolHandlers {
    /// Build every handler over one gateway
    pub fn new(gateway: &SharedUpstreamGateway) -> Self {
        Self {
            hosts: Arc::new(HostHandler::new(Arc::clone(gateway))),
            items: Arc::new(ItemHandler::new(Arc::clone(gateway))),
            events: Arc::new(EventHandler::new(Arc::clone(gateway))),
            catalog: Arc::new(CatalogHandler::new(Arc::clone(gateway))),
            apiinfo: Arc::new(ApiinfoHandler::new(Arc::clone(gateway))),
        }
    }
}

/// Route a tool call to the appropriate handler
pub async fn route_tool_call(
    call: ToolCall,
    handlers: &ToolHandlers,
) -> Result<CallToolResult, McpError> {
    debug!(tool = %call.tool(), "Routing tool call");
    match call {
        ToolCall::HostGet(args) => handlers.hosts.get(args).await,
        ToolCall::HostCreate(args) => handlers.hosts.create(args).await,
        ToolCall::HostUpdate(args) => handlers.hosts.update(args).await,
        ToolCall::HostDelete(args) => handlers.hosts.delete(args).await,
        ToolCall::HostgroupGet(args) => handlers.hosts.groups(args).await,
        ToolCall::ItemGet(args) => handlers.items.get(args).await,
        ToolCall::ItemCreate(args) => handlers.items.create(args).await,
        ToolCall::HistoryGet(args) => handlers.items.history(args).await,
        ToolCall::TriggerGet(args) => handlers.events.triggers(args).await,
        ToolCall::TriggerCreate(args) => handlers.events.create_trigger(args).await,
        ToolCall::ProblemGet(args) => handlers.events.problems(args).await,
        ToolCall::EventGet(args) => handlers.events.events(args).await,
        ToolCall::EventAcknowledge(args) => handlers.events.acknowledge(args).await,
        ToolCall::TemplateGet(args) => handlers.catalog.templates(args).await,
        ToolCall::DashboardGet(args) => handlers.catalog.dashboards(args).await,
        ToolCall::DashboardCreate(args) => handlers.catalog.create_dashboard(args).await,
        ToolCall::MaintenanceGet(args) => handlers.catalog.maintenances(args).await,
        ToolCall::ApiinfoVersion(args) => handlers.apiinfo.version(args).await,
    }
}
