//! HTTP front door for the streaming transport
//!
//! # Routes
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /sse` | Open a session and stream its events |
//! | `POST /messages?sessionId=<id>` | Send a JSON-RPC request to a session |
//! | `DELETE /sessions/<id>` | Close a session |
//! | `GET /tools` | Tool catalog |
//! | `GET /health` | Server and upstream status |
//! | `OPTIONS /<any>` | CORS preflight |
//!
//! # Example
//!
//! ```text
//! POST /messages?sessionId=4f6c... HTTP/1.1
//! Content-Type: application/json
//!
//! {"jsonrpc": "2.0", "method": "tools/list", "id": 1}
//!
//! HTTP/1.1 202 Accepted
//! {"accepted": true, "sessionId": "4f6c...", "id": 1}
//! ```
//!
//! The JSON-RPC response arrives on the session's stream as a `message`
//! event.

use futures::{Stream, StreamExt};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::status::Accepted;
use rocket::response::stream::{Event, EventStream};
use rocket::serde::json::Json;
use rocket::{
    Build, Catcher, Orbit, Request, Response, Rocket, Route, Shutdown, State, catch, catchers,
    delete, get, options, post, routes,
};
use serde_json::Value;
use tracing::info;

use super::address::SessionAddress;
use super::error::TransportError;
use super::streaming::StreamingTransport;
use super::types::{CloseResponse, DispatchAck, ErrorBody};
use crate::health::{HealthResponse, HealthState};
use crate::session::{CloseReason, OutboundEvent};

/// Routes served by the transport
pub fn transport_routes() -> Vec<Route> {
    routes![
        open_stream,
        dispatch_message,
        close_session,
        list_tools,
        health,
        preflight
    ]
}

/// JSON catchers so every failure has a structured body
pub fn json_catchers() -> Vec<Catcher> {
    catchers![bad_request, not_found, unprocessable, internal_error, fallback]
}

/// Mount the transport on a Rocket instance
pub fn mount(
    rocket: Rocket<Build>,
    transport: StreamingTransport,
    health: HealthState,
) -> Rocket<Build> {
    rocket
        .manage(transport)
        .manage(health)
        .mount("/", transport_routes())
        .register("/", json_catchers())
        .attach(Cors)
        .attach(CloseSessionsOnShutdown)
}

/// Render an outbound event as SSE
fn to_sse_event(event: OutboundEvent) -> Event {
    Event::json(&event.data).event(event.name)
}

/// Open a session and stream its events
#[get("/sse")]
async fn open_stream(
    transport: &State<StreamingTransport>,
    shutdown: Shutdown,
) -> Result<EventStream<impl Stream<Item = Event>>, TransportError> {
    let stream = transport.open_session().await?;
    let events = stream.into_stream().map(to_sse_event).take_until(shutdown);
    Ok(EventStream::from(events))
}

/// Route a JSON-RPC request to a session
#[post("/messages", data = "<body>")]
fn dispatch_message(
    transport: &State<StreamingTransport>,
    address: SessionAddress,
    body: Json<Value>,
) -> Result<Accepted<Json<DispatchAck>>, TransportError> {
    let ack = transport.dispatch(&address, body.into_inner())?;
    Ok(Accepted(Json(ack)))
}

/// Close a session; always answers 200
#[delete("/sessions/<id>")]
fn close_session(transport: &State<StreamingTransport>, id: &str) -> Json<CloseResponse> {
    Json(transport.close_session(id))
}

/// Tool catalog, same content as `tools/list`
#[get("/tools")]
fn list_tools(transport: &State<StreamingTransport>) -> Json<Value> {
    Json(transport.tools().list_value())
}

/// CORS preflight; the `Cors` fairing adds the headers
#[options("/<_..>")]
fn preflight() -> Status {
    Status::NoContent
}

/// Server and upstream status
#[get("/health")]
fn health(
    transport: &State<StreamingTransport>,
    state: &State<HealthState>,
) -> Json<HealthResponse> {
    Json(state.report(transport))
}

fn error_response(status: Status, kind: &'static str, request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    let message = format!(
        "{} for {} {}",
        status.reason_lossy(),
        request.method(),
        request.uri()
    );
    (status, Json(ErrorBody::new(kind, message)))
}

#[catch(400)]
fn bad_request(request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    error_response(Status::BadRequest, "malformed_request", request)
}

#[catch(404)]
fn not_found(request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    error_response(Status::NotFound, "not_found", request)
}

#[catch(422)]
fn unprocessable(request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    error_response(Status::UnprocessableEntity, "malformed_request", request)
}

#[catch(500)]
fn internal_error(request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    error_response(Status::InternalServerError, "internal", request)
}

#[catch(default)]
fn fallback(status: Status, request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    error_response(status, "http_error", request)
}

/// CORS Fairing for Rocket
///
/// Adds CORS headers to all responses to allow browser access.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS Headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

/// Closes every live session when Rocket shuts down
pub struct CloseSessionsOnShutdown;

#[rocket::async_trait]
impl Fairing for CloseSessionsOnShutdown {
    fn info(&self) -> Info {
        Info {
            name: "Close Sessions On Shutdown",
            kind: Kind::Shutdown,
        }
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        if let Some(transport) = rocket.state::<StreamingTransport>() {
            let closed = transport.sessions().close_all(CloseReason::Shutdown);
            info!(closed, "Sessions closed for shutdown");
        }
    }
}
