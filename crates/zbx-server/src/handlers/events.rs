//! Trigger, problem and event tool handlers

use rmcp::ErrorData as McpError;
use rmcp::model::CallToolResult;
use serde_json::json;
use zbx_domain::ports::SharedUpstreamGateway;

use super::{Params, call_upstream};
use crate::args::{
    EventAcknowledgeArgs, EventGetArgs, ProblemGetArgs, TriggerCreateArgs, TriggerGetArgs,
};
use crate::formatter::ResponseFormatter;
use crate::tools::ToolName;

/// `event.acknowledge` action bits
const ACTION_CLOSE: u32 = 1;
const ACTION_ACKNOWLEDGE: u32 = 2;
const ACTION_MESSAGE: u32 = 4;

/// Trigger value meaning "in problem state"
const TRIGGER_VALUE_PROBLEM: u8 = 1;

/// Handler for trigger, problem and event operations
pub struct EventHandler {
    gateway: SharedUpstreamGateway,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(gateway: SharedUpstreamGateway) -> Self {
        Self { gateway }
    }

    /// Handle the trigger_get tool request
    pub async fn triggers(&self, args: TriggerGetArgs) -> Result<CallToolResult, McpError> {
        let mut params = Params::extend()
            .set("selectHosts", json!(["hostid", "host"]))
            .set("expandDescription", true)
            .set_opt("triggerids", args.triggerids)
            .set_opt("hostids", args.hostids)
            .set_opt("min_severity", args.min_severity)
            .set_opt("limit", args.limit);
        if args.only_problems == Some(true) {
            params = params.set("filter", json!({ "value": TRIGGER_VALUE_PROBLEM }));
        }

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::TriggerGet, params.into_value()).await?;
        ResponseFormatter::format_records(ToolName::TriggerGet, records, args.limit)
    }

    /// Handle the trigger_create tool request
    pub async fn create_trigger(&self, args: TriggerCreateArgs) -> Result<CallToolResult, McpError> {
        let params = Params::default()
            .set("description", args.description)
            .set("expression", args.expression)
            .set_opt("priority", args.priority)
            .set_opt("comments", args.comments);

        let result =
            call_upstream(self.gateway.as_ref(), ToolName::TriggerCreate, params.into_value())
                .await?;
        ResponseFormatter::format_mutation(ToolName::TriggerCreate, &result)
    }

    /// Handle the problem_get tool request
    pub async fn problems(&self, args: ProblemGetArgs) -> Result<CallToolResult, McpError> {
        let params = Params::extend()
            .set_opt("hostids", args.hostids)
            .set_opt("severities", args.severities)
            .set_opt("recent", args.recent)
            .set("sortfield", json!(["eventid"]))
            .set("sortorder", "DESC")
            .set_opt("limit", args.limit);

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::ProblemGet, params.into_value()).await?;
        ResponseFormatter::format_records(ToolName::ProblemGet, records, args.limit)
    }

    /// Handle the event_get tool request
    pub async fn events(&self, args: EventGetArgs) -> Result<CallToolResult, McpError> {
        let params = Params::extend()
            .set_opt("eventids", args.eventids)
            .set_opt("hostids", args.hostids)
            .set_opt("time_from", args.time_from)
            .set_opt("time_till", args.time_till)
            .set("sortfield", json!(["clock", "eventid"]))
            .set("sortorder", "DESC")
            .set_opt("limit", args.limit);

        let records =
            call_upstream(self.gateway.as_ref(), ToolName::EventGet, params.into_value()).await?;
        ResponseFormatter::format_records(ToolName::EventGet, records, args.limit)
    }

    /// Handle the event_acknowledge tool request
    pub async fn acknowledge(&self, args: EventAcknowledgeArgs) -> Result<CallToolResult, McpError> {
        let action = acknowledge_action(args.message.is_some(), args.close);
        let params = Params::default()
            .set("eventids", args.eventids)
            .set("action", action)
            .set_opt("message", args.message);

        let result =
            call_upstream(self.gateway.as_ref(), ToolName::EventAcknowledge, params.into_value())
                .await?;
        ResponseFormatter::format_mutation(ToolName::EventAcknowledge, &result)
    }
}

/// Action bitmask for `event.acknowledge`
fn acknowledge_action(with_message: bool, close: bool) -> u32 {
    let mut action = ACTION_ACKNOWLEDGE;
    if with_message {
        action |= ACTION_MESSAGE;
    }
    if close {
        action |= ACTION_CLOSE;
    }
    action
}
