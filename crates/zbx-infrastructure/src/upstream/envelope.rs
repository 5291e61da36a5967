//! JSON-RPC envelope helpers for the upstream API

use serde_json::{Value, json};
use zbx_domain::constants::{JSONRPC_VERSION, UPSTREAM_API_PATH, UPSTREAM_AUTH_ERROR_MARKERS};
use zbx_domain::error::{Error, Result};
use zbx_domain::value_objects::AuthStrategy;

/// Full JSON-RPC endpoint for a configured frontend URL
///
/// `https://host/zabbix/` and `https://host/zabbix/api_jsonrpc.php` both
/// resolve to the latter.
pub fn normalize_endpoint(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.ends_with(UPSTREAM_API_PATH) {
        trimmed.to_string()
    } else {
        format!("{trimmed}/{UPSTREAM_API_PATH}")
    }
}

/// Build a request body; the token is embedded only for the legacy strategy
pub fn request_body(
    method: &str,
    params: Value,
    id: u64,
    auth: Option<(AuthStrategy, &str)>,
) -> Value {
    let mut body = json!({
        "jsonrpc": JSONRPC_VERSION,
        "method": method,
        "params": params,
        "id": id,
    });
    if let Some((AuthStrategy::LegacyBodyField, token)) = auth {
        body["auth"] = Value::String(token.to_string());
    }
    body
}

/// Extract `result` from a response envelope, mapping `error` to a domain error
pub fn parse_response(method: &str, envelope: Value) -> Result<Value> {
    if let Some(error) = envelope.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        let detail = match error.get("data") {
            Some(Value::String(data)) if !data.is_empty() => format!("{message} {data}"),
            _ => message.to_string(),
        };
        return Err(Error::upstream(method, code, detail));
    }

    envelope
        .get("result")
        .cloned()
        .ok_or_else(|| Error::internal(format!("Upstream response for {method} has no result")))
}

/// Whether an error means the credentials or session token were rejected
///
/// Such errors are recoverable by switching strategy or logging in again.
pub fn is_auth_rejection(error: &Error) -> bool {
    match error {
        Error::Authentication { .. } => true,
        Error::Upstream { message, .. } => {
            let lowered = message.to_lowercase();
            UPSTREAM_AUTH_ERROR_MARKERS
                .iter()
                .any(|marker| lowered.contains(marker))
        }
        _ => false,
    }
}
