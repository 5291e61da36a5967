use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream login identity
///
/// The `Debug` implementation never prints secrets.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Pre-issued API token
    Token(String),
    /// Username and password exchanged for a session token via `user.login`
    Password {
        /// Login name
        user: String,
        /// Login password
        password: String,
    },
}

impl Credentials {
    /// Whether a fresh login can replace a rejected token
    pub fn can_relogin(&self) -> bool {
        matches!(self, Self::Password { .. })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Credentials::Token(<redacted>)"),
            Self::Password { user, .. } => f
                .debug_struct("Credentials::Password")
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// How the authentication token is attached to an upstream request
///
/// Strategies are tried in [`AuthStrategy::ORDER`] when the upstream rejects
/// a call with a recoverable authentication error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStrategy {
    /// `Authorization: Bearer <token>` header
    BearerHeader,
    /// `auth` member inside the JSON-RPC body (pre-6.4 frontends)
    LegacyBodyField,
}

impl AuthStrategy {
    /// Fallback order
    pub const ORDER: [AuthStrategy; 2] = [AuthStrategy::BearerHeader, AuthStrategy::LegacyBodyField];

    /// Strategies to try, starting from `preferred` and wrapping around
    pub fn sequence_from(preferred: AuthStrategy) -> impl Iterator<Item = AuthStrategy> {
        let start = Self::ORDER
            .iter()
            .position(|s| *s == preferred)
            .unwrap_or(0);
        Self::ORDER
            .into_iter()
            .cycle()
            .skip(start)
            .take(Self::ORDER.len())
    }

    /// Stable name for logs and health output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BearerHeader => "bearer_header",
            Self::LegacyBodyField => "legacy_body_field",
        }
    }
}

impl fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the upstream authentication state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether the last authenticated call or login succeeded
    pub authenticated: bool,
    /// Strategy that last succeeded
    pub strategy: Option<AuthStrategy>,
    /// Last authentication failure, without credential material
    pub last_error: Option<String>,
}

impl AuthStatus {
    /// Status before any upstream interaction
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            strategy: None,
            last_error: None,
        }
    }
}
