//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Credentials`] | Upstream login identity (API token or user/password) |
//! | [`AuthStrategy`] | How credentials are attached to an upstream call |
//! | [`AuthStatus`] | Snapshot of the upstream authentication state |

/// Upstream authentication value objects
pub mod auth;

pub use auth::{AuthStatus, AuthStrategy, Credentials};
