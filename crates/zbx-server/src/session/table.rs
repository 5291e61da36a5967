//! Session table
//!
//! The single authoritative map from session id to live session. Every
//! teardown path (client disconnect, explicit close, idle eviction,
//! shutdown) goes through [`SessionTable::close`].

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use tracing::{debug, info};

use super::id::SessionId;
use super::session::Session;

/// Why a session is being closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The client's stream went away
    ClientDisconnected,
    /// `DELETE /sessions/<id>`
    Explicit,
    /// Evicted by the reaper
    IdleTimeout,
    /// The server is stopping
    Shutdown,
}

impl CloseReason {
    /// Stable name used in notices and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientDisconnected => "client_disconnected",
            Self::Explicit => "explicit",
            Self::IdleTimeout => "idle_timeout",
            Self::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// This call closed the session
    Closed,
    /// Unknown id, or another path closed it first
    AlreadyClosed,
}

/// An insert collided with a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session {0} is already registered")]
pub struct DuplicateSession(pub SessionId);

/// Concurrent registry of live sessions
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: DashMap<SessionId, Arc<Session>>,
}

impl SessionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session; an id collision leaves the table untouched
    pub fn insert(&self, session: Arc<Session>) -> Result<(), DuplicateSession> {
        match self.sessions.entry(session.id()) {
            Entry::Occupied(_) => Err(DuplicateSession(session.id())),
            Entry::Vacant(slot) => {
                slot.insert(session);
                Ok(())
            }
        }
    }

    /// Look up a session by id
    pub fn get(&self, id: &SessionId) -> Option<Arc<Session>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Resolve the first textual candidate naming a live, open session
    pub fn resolve<'a, I>(&self, candidates: I) -> Option<Arc<Session>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .filter_map(SessionId::parse_lenient)
            .find_map(|id| self.get(&id).filter(|session| session.is_open()))
    }

    /// Every live session at this instant
    ///
    /// Returns owned handles so no shard lock outlives the call.
    pub fn snapshot(&self) -> Vec<Arc<Session>> {
        self.sessions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is live
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Close a session; safe to call any number of times from any path
    pub fn close(&self, id: &SessionId, reason: CloseReason) -> CloseOutcome {
        let Some(session) = self.get(id) else {
            debug!(session_id = %id, %reason, "Close requested for unknown session");
            return CloseOutcome::AlreadyClosed;
        };
        if !session.begin_close() {
            debug!(session_id = %id, %reason, "Session already closing");
            return CloseOutcome::AlreadyClosed;
        }

        self.sessions
            .remove_if(id, |_, current| Arc::ptr_eq(current, &session));
        session.finish_close();

        info!(
            session_id = %id,
            %reason,
            remaining = self.sessions.len(),
            "Session closed"
        );
        CloseOutcome::Closed
    }

    /// Close every live session, returning how many this call closed
    pub fn close_all(&self, reason: CloseReason) -> usize {
        self.snapshot()
            .iter()
            .filter(|session| self.close(&session.id(), reason) == CloseOutcome::Closed)
            .count()
    }
}
