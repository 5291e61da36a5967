//! Session Management
//!
//! In-memory registry of live SSE sessions.
//!
//! - `id.rs` - canonical session identifier and lenient parsing
//! - `session.rs` - one logical connection and its lifecycle state machine
//! - `table.rs` - concurrent session table with the single close path

pub mod id;
pub mod session;
pub mod table;

pub use id::SessionId;
pub use session::{OutboundEvent, Session, SessionClosed, SessionState};
pub use table::{CloseOutcome, CloseReason, DuplicateSession, SessionTable};
