//! Template, dashboard and maintenance tool handlers

use rmcp::ErrorData as McpError;
use rmcp::model::CallToolResult;
use serde_json::json;
use zbx_domain::ports::SharedUpstreamGateway;

use super::{Params, call_upstream};
use crate::args::{DashboardCreateArgs, DashboardGetArgs, MaintenanceGetArgs, TemplateGetArgs};
use crate::formatter::ResponseFormatter;
use crate::tools::ToolName;

/// Handler for templates, dashboards and maintenance periods
pub struct CatalogHandler {
    gateway: SharedUpstreamGateway,
}

impl CatalogHandler {
    /// Create a new catalog handler
    pub fn new(gateway: SharedUpstreamGateway) -> Self {
        Self { gateway }
    }

    /// Handle the template_get tool request
    pub async fn templates(&self, args: TemplateGetArgs) -> Result<CallToolResult, McpError> {
        let mut params = Params::extend()
            .set_opt("templateids", args.templateids)
            .set_opt("limit", args.limit);
        if let Some(search) = args.search {
            params = params.set("search", json!({ "name": search }));
        }

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::TemplateGet, params.into_value())
                .await?;
        ResponseFormatter::format_records(ToolName::TemplateGet, records, args.limit)
    }

    /// Handle the dashboard_get tool request
    pub async fn dashboards(&self, args: DashboardGetArgs) -> Result<CallToolResult, McpError> {
        let params = Params::extend()
            .set_opt("dashboardids", args.dashboardids)
            .set_opt("limit", args.limit);

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::DashboardGet, params.into_value())
                .await?;
        ResponseFormatter::format_records(ToolName::DashboardGet, records, args.limit)
    }

    /// Handle the dashboard_create tool request
    pub async fn create_dashboard(
        &self,
        args: DashboardCreateArgs,
    ) -> Result<CallToolResult, McpError> {
        // The upstream requires at least one page.
        let pages = args
            .pages
            .filter(|pages| !pages.is_empty())
            .unwrap_or_else(|| vec![json!({ "widgets": [] })]);
        let params = Params::default()
            .set("name", args.name)
            .set("pages", pages)
            .set_opt("display_period", args.display_period)
            .set_opt("auto_start", args.auto_start.map(u8::from));

        let result =
            call_upstream(self.gateway.as_ref(), ToolName::DashboardCreate, params.into_value())
                .await?;
        ResponseFormatter::format_mutation(ToolName::DashboardCreate, &result)
    }

    /// Handle the maintenance_get tool request
    pub async fn maintenances(&self, args: MaintenanceGetArgs) -> Result<CallToolResult, McpError> {
        let params = Params::extend()
            .set("selectTimeperiods", "extend")
            .set_opt("maintenanceids", args.maintenanceids)
            .set_opt("hostids", args.hostids)
            .set_opt("limit", args.limit);

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::MaintenanceGet, params.into_value())
                .await?;
        ResponseFormatter::format_records(ToolName::MaintenanceGet, records, args.limit)
    }
}
