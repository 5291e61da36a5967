//! Host and host group tool handlers

use rmcp::ErrorData as McpError;
use rmcp::model::CallToolResult;
use serde_json::{Value, json};
use zbx_domain::ports::SharedUpstreamGateway;

use super::{Params, call_upstream};
use crate::args::{HostCreateArgs, HostDeleteArgs, HostGetArgs, HostUpdateArgs, HostgroupGetArgs};
use crate::formatter::ResponseFormatter;
use crate::tools::ToolName;

/// Handler for host and host group operations
pub struct HostHandler {
    gateway: SharedUpstreamGateway,
}

impl HostHandler {
    /// Create a new host handler
    pub fn new(gateway: SharedUpstreamGateway) -> Self {
        Self { gateway }
    }

    /// Handle the host_get tool request
    pub async fn get(&self, args: HostGetArgs) -> Result<CallToolResult, McpError> {
        let mut params = Params::extend()
            .set("selectInterfaces", json!(["ip", "dns", "port"]))
            .set_opt("hostids", args.hostids)
            .set_opt("groupids", args.groupids)
            .set_opt("limit", args.limit);
        if let Some(search) = args.search {
            params = params
                .set("search", json!({ "host": search, "name": search }))
                .set("searchByAny", true);
        }

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::HostGet, params.into_value()).await?;
        ResponseFormatter::format_records(ToolName::HostGet, records, args.limit)
    }

    /// Handle the host_create tool request
    pub async fn create(&self, args: HostCreateArgs) -> Result<CallToolResult, McpError> {
        let groups: Vec<_> = args
            .groupids
            .into_iter()
            .map(|groupid| json!({ "groupid": groupid }))
            .collect();
        let templates = args.templateids.map(|ids| {
            ids.into_iter()
                .map(|templateid| json!({ "templateid": templateid }))
                .collect::<Vec<_>>()
        });

        let params = Params::default()
            .set("host", args.host)
            .set_opt("name", args.name)
            .set("groups", groups)
            .set_opt("templates", templates)
            .set_opt("interfaces", args.interfaces)
            .set_opt("description", args.description);

        let result =
            call_upstream(self.gateway.as_ref(), ToolName::HostCreate, params.into_value()).await?;
        ResponseFormatter::format_mutation(ToolName::HostCreate, &result)
    }

    /// Handle the host_update tool request
    pub async fn update(&self, args: HostUpdateArgs) -> Result<CallToolResult, McpError> {
        let params = Params::default()
            .set("hostid", args.hostid)
            .set_opt("host", args.host)
            .set_opt("name", args.name)
            .set_opt("status", args.status)
            .set_opt("description", args.description);

        let result =
            call_upstream(self.gateway.as_ref(), ToolName::HostUpdate, params.into_value()).await?;
        ResponseFormatter::format_mutation(ToolName::HostUpdate, &result)
    }

    /// Handle the host_delete tool request
    pub async fn delete(&self, args: HostDeleteArgs) -> Result<CallToolResult, McpError> {
        let result =
            call_upstream(self.gateway.as_ref(), ToolName::HostDelete, Value::from(args.hostids)).await?;
        ResponseFormatter::format_mutation(ToolName::HostDelete, &result)
    }

    /// Handle the hostgroup_get tool request
    pub async fn groups(&self, args: HostgroupGetArgs) -> Result<CallToolResult, McpError> {
        let mut params = Params::extend()
            .set_opt("groupids", args.groupids)
            .set_opt("limit", args.limit);
        if let Some(search) = args.search {
            params = params.set("search", json!({ "name": search }));
        }

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::HostgroupGet, params.into_value())
                .await?;
        ResponseFormatter::format_records(ToolName::HostgroupGet, records, args.limit)
    }
}
