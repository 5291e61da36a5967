//! MCP Tools Module
//!
//! - name.rs - Closed set of tool names and their upstream methods
//! - call.rs - Boundary parsing into typed calls
//! - registry.rs - Tool definitions, schema management and policy
//! - router.rs - Tool dispatch and routing
//! - error.rs - Translation of failures into JSON-RPC errors

pub mod call;
pub mod error;
pub mod name;
pub mod registry;
pub mod router;

pub use call::ToolCall;
pub use name::{ToolName, UnknownTool};
pub use registry::{ToolDefinitions, ToolRegistry, create_tool_list};
pub use router::{ToolHandlers, route_tool_call};
