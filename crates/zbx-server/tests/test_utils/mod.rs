//! Shared test utilities for zbx-server
//!
//! - `tests/unit.rs` - Unit tests (args, builder, registry, reaper)
//! - `tests/integration.rs` - Integration tests (transport, HTTP)
//!
//! Run all tests: `cargo test -p zbx-server`

#![allow(dead_code)]

pub mod stub_gateway;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use zbx_domain::ports::SharedUpstreamGateway;
use zbx_infrastructure::config::SessionConfig;
use zbx_server::session::OutboundEvent;
use zbx_server::transport::SessionStream;
use zbx_server::{McpServer, McpServerBuilder};

pub use stub_gateway::{STUB_API_VERSION, STUB_ENDPOINT, StubGateway, host_fixture};

/// Default timeout for async tests
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Server over `gateway`
pub fn server_with(gateway: &Arc<StubGateway>, read_only: bool) -> McpServer {
    server_with_sessions(gateway, read_only, SessionConfig::default())
}

/// Server over `gateway` with explicit session settings
pub fn server_with_sessions(
    gateway: &Arc<StubGateway>,
    read_only: bool,
    sessions: SessionConfig,
) -> McpServer {
    let shared: SharedUpstreamGateway = Arc::clone(gateway) as _;
    McpServerBuilder::new()
        .with_gateway(shared)
        .with_read_only(read_only)
        .with_session_config(sessions)
        .build()
        .expect("server builds")
}

/// JSON-RPC request body
pub fn rpc(id: i64, method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
}

/// `tools/call` request body
pub fn tool_call(id: i64, name: &str, arguments: Value) -> Value {
    rpc(id, "tools/call", json!({"name": name, "arguments": arguments}))
}

/// Next event on a session stream, failing the test after [`TEST_TIMEOUT`]
pub async fn next_event(stream: &mut SessionStream) -> Option<OutboundEvent> {
    tokio::time::timeout(TEST_TIMEOUT, stream.next_event())
        .await
        .expect("event within timeout")
}

/// Parse the JSON text block of a successful `tools/call` result
pub fn tool_text(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content");
    serde_json::from_str(text).expect("JSON tool output")
}
