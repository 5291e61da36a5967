//! MCP Transport Layer
//!
//! Session-oriented streaming transport over HTTP.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`streaming`] | Open, dispatch and close operations over the session table |
//! | [`methods`] | JSON-RPC method handling |
//! | [`http`] | Rocket routes, catchers and fairings |
//! | [`address`] | Session id extraction from query and headers |
//! | [`types`] | JSON-RPC envelopes and HTTP bodies |
//! | [`error`] | Transport errors and their HTTP rendering |
//!
//! ## Usage
//!
//! ```rust,ignore
//! let transport = StreamingTransport::new(sessions, tools, gateway, 64);
//! let mut stream = transport.open_session().await?;
//! let announcement = stream.next_event().await;
//! transport.dispatch(&SessionAddress::from_query(&stream.id().to_string()), request)?;
//! ```

pub mod address;
pub mod error;
pub mod http;
pub mod methods;
pub mod streaming;
pub mod types;

pub use address::SessionAddress;
pub use error::TransportError;
pub use http::{CloseSessionsOnShutdown, Cors, json_catchers, mount, transport_routes};
pub use streaming::{SessionStream, StreamingTransport};
pub use types::{CloseResponse, DispatchAck, ErrorBody, McpRequest, McpResponse};
