//! A single logical connection

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::id::SessionId;
use crate::constants::{SSE_EVENT_CLOSED, SSE_EVENT_MESSAGE, SSE_EVENT_SESSION};

/// Lifecycle state
///
/// Transitions only move forward: `Open -> Closing -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SessionState {
    /// Registered and accepting messages
    Open = 0,
    /// Teardown in progress
    Closing = 1,
    /// Removed from the table, stream ended
    Closed = 2,
}

impl SessionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Open,
            1 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

/// One message queued for the client's event stream
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEvent {
    /// SSE event name
    pub name: &'static str,
    /// JSON payload
    pub data: Value,
}

impl OutboundEvent {
    /// Session announcement, always the first event on a stream
    pub fn announcement(id: SessionId) -> Self {
        Self {
            name: SSE_EVENT_SESSION,
            data: json!({"type": "session", "sessionId": id}),
        }
    }

    /// JSON-RPC response
    pub fn message(payload: Value) -> Self {
        Self {
            name: SSE_EVENT_MESSAGE,
            data: payload,
        }
    }

    /// Notice that the server is closing the session
    pub fn closed(reason: &str) -> Self {
        Self {
            name: SSE_EVENT_CLOSED,
            data: json!({"type": "session_closed", "reason": reason}),
        }
    }
}

/// The session no longer accepts messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session is closed")]
pub struct SessionClosed;

/// A registered logical connection
///
/// The session owns the only sender of its outbound queue, so every write
/// to the client is serialized through it.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    outbound: mpsc::Sender<OutboundEvent>,
    created_at: DateTime<Utc>,
    last_activity: Mutex<Instant>,
    state: AtomicU8,
    closed: CancellationToken,
}

impl Session {
    /// Create an open session and the receiving end of its queue
    pub fn new(id: SessionId, capacity: usize) -> (Arc<Self>, mpsc::Receiver<OutboundEvent>) {
        let (outbound, receiver) = mpsc::channel(capacity.max(1));
        let session = Arc::new(Self {
            id,
            outbound,
            created_at: Utc::now(),
            last_activity: Mutex::new(Instant::now()),
            state: AtomicU8::new(SessionState::Open as u8),
            closed: CancellationToken::new(),
        });
        (session, receiver)
    }

    /// Session identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Wall-clock creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether the session still accepts messages
    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }

    /// Time of the last routed inbound call
    pub fn last_activity(&self) -> Instant {
        *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Record inbound activity now
    pub fn touch(&self) {
        self.touch_at(Instant::now());
    }

    /// Record inbound activity at `at`; never moves the timestamp backwards
    pub fn touch_at(&self, at: Instant) {
        let mut last = self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if at > *last {
            *last = at;
        }
    }

    /// Time since the last activity, as seen at `now`
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity())
    }

    /// Token cancelled once the session is closed
    pub fn closed_token(&self) -> CancellationToken {
        self.closed.clone()
    }

    /// Queue an event, waiting for room in the queue
    ///
    /// Fails once the session is closing or its stream has gone away.
    pub async fn send(&self, event: OutboundEvent) -> Result<(), SessionClosed> {
        if !self.is_open() {
            return Err(SessionClosed);
        }
        tokio::select! {
            sent = self.outbound.send(event) => sent.map_err(|_| SessionClosed),
            () = self.closed.cancelled() => Err(SessionClosed),
        }
    }

    /// Queue an event without waiting
    pub fn try_send(&self, event: OutboundEvent) -> Result<(), SessionClosed> {
        if !self.is_open() {
            return Err(SessionClosed);
        }
        self.outbound.try_send(event).map_err(|_| SessionClosed)
    }

    /// Move `Open -> Closing`; only one caller ever wins
    pub(crate) fn begin_close(&self) -> bool {
        self.state
            .compare_exchange(
                SessionState::Open as u8,
                SessionState::Closing as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Move to `Closed` and end the stream
    pub(crate) fn finish_close(&self) {
        self.state
            .store(SessionState::Closed as u8, Ordering::Release);
        self.closed.cancel();
    }
}
