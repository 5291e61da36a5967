//! Item and history tool handlers

use rmcp::ErrorData as McpError;
use rmcp::model::CallToolResult;
use serde_json::json;
use zbx_domain::ports::SharedUpstreamGateway;

use super::{Params, call_upstream};
use crate::args::{HistoryGetArgs, ItemCreateArgs, ItemGetArgs};
use crate::formatter::ResponseFormatter;
use crate::tools::ToolName;

/// Numeric float history, the upstream default
const DEFAULT_HISTORY_TYPE: u8 = 0;

/// Handler for item and history operations
pub struct ItemHandler {
    gateway: SharedUpstreamGateway,
}

impl ItemHandler {
    /// Create a new item handler
    pub fn new(gateway: SharedUpstreamGateway) -> Self {
        Self { gateway }
    }

    /// Handle the item_get tool request
    pub async fn get(&self, args: ItemGetArgs) -> Result<CallToolResult, McpError> {
        let mut params = Params::extend()
            .set_opt("itemids", args.itemids)
            .set_opt("hostids", args.hostids)
            .set_opt("limit", args.limit);
        if let Some(search) = args.search {
            params = params.set("search", json!({ "key_": search }));
        }

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::ItemGet, params.into_value()).await?;
        ResponseFormatter::format_records(ToolName::ItemGet, records, args.limit)
    }

    /// Handle the item_create tool request
    pub async fn create(&self, args: ItemCreateArgs) -> Result<CallToolResult, McpError> {
        let params = Params::default()
            .set("hostid", args.hostid)
            .set("name", args.name)
            .set("key_", args.key_)
            .set("type", args.item_type)
            .set("value_type", args.value_type)
            .set_opt("delay", args.delay)
            .set_opt("interfaceid", args.interfaceid)
            .set_opt("units", args.units);

        let result =
            call_upstream(self.gateway.as_ref(), ToolName::ItemCreate, params.into_value()).await?;
        ResponseFormatter::format_mutation(ToolName::ItemCreate, &result)
    }

    /// Handle the history_get tool request
    pub async fn history(&self, args: HistoryGetArgs) -> Result<CallToolResult, McpError> {
        let params = Params::extend()
            .set("itemids", args.itemids)
            .set("history", args.history.unwrap_or(DEFAULT_HISTORY_TYPE))
            .set_opt("time_from", args.time_from)
            .set_opt("time_till", args.time_till)
            .set("sortfield", "clock")
            .set("sortorder", "DESC")
            .set_opt("limit", args.limit);

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::HistoryGet, params.into_value()).await?;
        ResponseFormatter::format_records(ToolName::HistoryGet, records, args.limit)
    }
}
