//! API information tool handler

use rmcp::ErrorData as McpError;
use rmcp::model::CallToolResult;
use zbx_domain::ports::SharedUpstreamGateway;

use crate::args::ApiinfoVersionArgs;
use crate::formatter::ResponseFormatter;
use crate::tools::ToolName;
use crate::tools::error::from_domain;

/// Handler for the apiinfo_version tool
pub struct ApiinfoHandler {
    gateway: SharedUpstreamGateway,
}

impl ApiinfoHandler {
    /// Create a new apiinfo handler
    pub fn new(gateway: SharedUpstreamGateway) -> Self {
        Self { gateway }
    }

    /// Handle the apiinfo_version tool request
    pub async fn version(&self, _args: ApiinfoVersionArgs) -> Result<CallToolResult, McpError> {
        let version = self
            .gateway
            .api_version()
            .await
            .map_err(|e| from_domain(ToolName::ApiinfoVersion, &e))?;
        ResponseFormatter::format_version(&version)
    }
}
