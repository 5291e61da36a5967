//! Session identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Canonical session identifier
///
/// Generated by the transport when a stream opens. Rendered as a lowercase
/// hyphenated UUID; any other textual form of the same UUID parses back to
/// the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier written in any common UUID form
    ///
    /// Accepts surrounding whitespace and quotes, uppercase digits, the
    /// simple (no hyphens) form, braces and the `urn:uuid:` prefix.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let trimmed = raw
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .trim();
        if trimmed.is_empty() {
            return None;
        }
        Uuid::parse_str(trimmed).ok().map(Self)
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SessionId {
    type Err = InvalidSessionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| InvalidSessionId(s.to_string()))
    }
}

impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A string that is not a session identifier in any accepted form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a session id: {0:?}")]
pub struct InvalidSessionId(pub String);
