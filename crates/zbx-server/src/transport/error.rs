//! Transport errors
//!
//! Routing failures reported synchronously to the HTTP caller. Each one
//! renders as a structured JSON body with a matching status code.

use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use zbx_domain::error::Error;

use super::types::ErrorBody;

/// Failure of a stream-open or dispatch request
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// No session id in the query or headers
    #[error("missing session id")]
    MissingSessionId,

    /// Body is not a valid JSON-RPC 2.0 request
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// No live session matches the supplied id
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Upstream authentication failed while opening a stream
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] Error),

    /// The session could not be registered or announced
    #[error("session could not be opened: {0}")]
    SessionOpen(String),

    /// Unexpected server-side failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl TransportError {
    /// Create a malformed request error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest(message.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> Status {
        match self {
            Self::MissingSessionId | Self::MalformedRequest(_) => Status::BadRequest,
            Self::SessionNotFound(_) => Status::NotFound,
            Self::UpstreamUnavailable(_) => Status::ServiceUnavailable,
            Self::SessionOpen(_) | Self::Internal(_) => Status::InternalServerError,
        }
    }

    /// Machine-readable category
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSessionId => "missing_session_id",
            Self::MalformedRequest(_) => "malformed_request",
            Self::SessionNotFound(_) => "session_not_found",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::SessionOpen(_) => "session_open_failed",
            Self::Internal(_) => "internal",
        }
    }

    /// Structured body
    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(self.kind(), self.to_string())
    }
}

impl<'r> Responder<'r, 'static> for TransportError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status(), Json(self.body())).respond_to(request)
    }
}
