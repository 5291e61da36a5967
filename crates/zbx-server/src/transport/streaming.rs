//! Session-oriented streaming transport
//!
//! A client opens a long-lived event stream, learns its session id from the
//! first event, then sends JSON-RPC requests as separate calls addressed to
//! that session. Responses are delivered only on the stream.

use std::sync::Arc;

use futures::Stream;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use zbx_domain::ports::SharedUpstreamGateway;

use super::address::SessionAddress;
use super::error::TransportError;
use super::methods::handle_request;
use super::types::{CloseResponse, DispatchAck, McpRequest};
use crate::session::{
    CloseOutcome, CloseReason, OutboundEvent, Session, SessionId, SessionTable,
};
use crate::tools::ToolRegistry;

/// Opens sessions, routes calls to them and closes them
#[derive(Clone)]
pub struct StreamingTransport {
    sessions: Arc<SessionTable>,
    tools: Arc<ToolRegistry>,
    gateway: SharedUpstreamGateway,
    channel_capacity: usize,
}

impl StreamingTransport {
    /// Create a transport over an existing table
    pub fn new(
        sessions: Arc<SessionTable>,
        tools: Arc<ToolRegistry>,
        gateway: SharedUpstreamGateway,
        channel_capacity: usize,
    ) -> Self {
        Self {
            sessions,
            tools,
            gateway,
            channel_capacity,
        }
    }

    /// Live sessions
    pub fn sessions(&self) -> &Arc<SessionTable> {
        &self.sessions
    }

    /// Tool registry
    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    /// Upstream gateway
    pub fn gateway(&self) -> &SharedUpstreamGateway {
        &self.gateway
    }

    /// Open a new session
    ///
    /// Upstream authentication is ensured first; on failure nothing is
    /// registered. The returned stream yields the session announcement
    /// before anything else.
    pub async fn open_session(&self) -> Result<SessionStream, TransportError> {
        if let Err(e) = self.gateway.ensure_authenticated().await {
            error!(error = %e, "Upstream authentication failed, refusing session");
            return Err(TransportError::UpstreamUnavailable(e));
        }

        let (session, receiver) = Session::new(SessionId::new(), self.channel_capacity);
        let id = session.id();
        self.sessions
            .insert(Arc::clone(&session))
            .map_err(|e| TransportError::SessionOpen(e.to_string()))?;

        if session.try_send(OutboundEvent::announcement(id)).is_err() {
            self.sessions.close(&id, CloseReason::ClientDisconnected);
            return Err(TransportError::SessionOpen(format!(
                "session {id} could not be announced"
            )));
        }

        info!(session_id = %id, sessions = self.sessions.len(), "Session opened");
        Ok(SessionStream {
            session,
            receiver,
            sessions: Arc::clone(&self.sessions),
        })
    }

    /// Route a JSON-RPC request to the session named by `address`
    ///
    /// Returns as soon as the request is routed; the response is written to
    /// the session's stream by a spawned task.
    pub fn dispatch(
        &self,
        address: &SessionAddress,
        body: Value,
    ) -> Result<DispatchAck, TransportError> {
        if address.is_empty() {
            return Err(TransportError::MissingSessionId);
        }
        let request = McpRequest::from_value(body)?;

        let Some(session) = self.sessions.resolve(address.candidates()) else {
            let requested = address.candidates().next().unwrap_or_default().to_string();
            debug!(session_id = %requested, method = %request.method, "Dispatch to unknown session");
            return Err(TransportError::SessionNotFound(requested));
        };

        session.touch();
        let ack = DispatchAck {
            accepted: true,
            session_id: session.id(),
            id: request.id.clone(),
        };
        debug!(session_id = %session.id(), method = %request.method, "Request accepted");

        let tools = Arc::clone(&self.tools);
        tokio::spawn(deliver(tools, session, request));
        Ok(ack)
    }

    /// Close a session on the client's request; idempotent
    pub fn close_session(&self, raw_id: &str) -> CloseResponse {
        let closed = SessionId::parse_lenient(raw_id).is_some_and(|id| {
            if let Some(session) = self.sessions.get(&id) {
                // Best effort; the stream may already be gone.
                let _ = session.try_send(OutboundEvent::closed(CloseReason::Explicit.as_str()));
            }
            self.sessions.close(&id, CloseReason::Explicit) == CloseOutcome::Closed
        });

        CloseResponse {
            session_id: raw_id.to_string(),
            closed,
        }
    }
}

/// Run one request and write its response to the session
async fn deliver(tools: Arc<ToolRegistry>, session: Arc<Session>, request: McpRequest) {
    let Some(response) = handle_request(&tools, &request).await else {
        return;
    };

    if session
        .send(OutboundEvent::message(response.to_value()))
        .await
        .is_err()
    {
        debug!(
            session_id = %session.id(),
            method = %request.method,
            "Session closed before the response was delivered, discarding"
        );
    }
}

/// Receiving end of one session's event stream
///
/// Dropping it closes the session with [`CloseReason::ClientDisconnected`].
pub struct SessionStream {
    session: Arc<Session>,
    receiver: mpsc::Receiver<OutboundEvent>,
    sessions: Arc<SessionTable>,
}

impl SessionStream {
    /// Session this stream belongs to
    pub fn id(&self) -> SessionId {
        self.session.id()
    }

    /// Token cancelled when the session closes
    pub fn closed_token(&self) -> CancellationToken {
        self.session.closed_token()
    }

    /// Next event, or `None` once the session is closed and drained
    pub async fn next_event(&mut self) -> Option<OutboundEvent> {
        let closed = self.session.closed_token();
        tokio::select! {
            biased;
            event = self.receiver.recv() => event,
            () = closed.cancelled() => self.receiver.try_recv().ok(),
        }
    }

    /// Adapt into a stream of events
    pub fn into_stream(mut self) -> impl Stream<Item = OutboundEvent> + Send {
        async_stream::stream! {
            while let Some(event) = self.next_event().await {
                yield event;
            }
        }
    }
}

impl Drop for SessionStream {
    fn drop(&mut self) {
        self.sessions
            .close(&self.session.id(), CloseReason::ClientDisconnected);
    }
}
