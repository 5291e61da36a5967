//! Upstream client tests against a mock JSON-RPC endpoint

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};
use zbx_domain::error::Error;
use zbx_domain::ports::UpstreamGateway;
use zbx_domain::value_objects::AuthStrategy;
use zbx_infrastructure::config::UpstreamConfig;
use zbx_infrastructure::upstream::ZabbixClient;

const API_PATH: &str = "/api_jsonrpc.php";

fn token_config(server: &ServerGuard) -> UpstreamConfig {
    UpstreamConfig {
        url: server.url(),
        token: Some("tok".to_string()),
        user: None,
        password: None,
        timeout_secs: 5,
    }
}

fn password_config(server: &ServerGuard) -> UpstreamConfig {
    UpstreamConfig {
        url: format!("{}/", server.url()),
        token: None,
        user: Some("Admin".to_string()),
        password: Some("hunter2".to_string()),
        timeout_secs: 5,
    }
}

fn result_body(result: Value) -> String {
    json!({"jsonrpc": "2.0", "result": result, "id": 1}).to_string()
}

fn error_body(code: i64, message: &str, data: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "error": {"code": code, "message": message, "data": data},
        "id": 1
    })
    .to_string()
}

fn mock_json(server: &mut ServerGuard, method: &str) -> Mock {
    server
        .mock("POST", API_PATH)
        .match_body(Matcher::PartialJson(json!({"method": method})))
        .with_header("content-type", "application/json")
}

#[tokio::test]
async fn bearer_header_is_tried_first() {
    let mut server = Server::new_async().await;
    let hosts = mock_json(&mut server, "host.get")
        .match_header("authorization", "Bearer tok")
        .with_body(result_body(json!([{"hostid": "10084", "host": "web-01"}])))
        .expect(1)
        .create_async()
        .await;

    let client = ZabbixClient::new(&token_config(&server)).unwrap();
    let result = client
        .call("host.get", json!({"output": ["hostid", "host"]}))
        .await
        .unwrap();

    assert_eq!(result[0]["host"], "web-01");
    let status = client.auth_status();
    assert!(status.authenticated);
    assert_eq!(status.strategy, Some(AuthStrategy::BearerHeader));
    hosts.assert_async().await;
}

#[tokio::test]
async fn falls_back_to_body_auth_and_remembers_it() {
    let mut server = Server::new_async().await;
    let bearer = mock_json(&mut server, "host.get")
        .match_header("authorization", "Bearer tok")
        .with_body(error_body(-32602, "Invalid params.", "Not authorised."))
        .expect(1)
        .create_async()
        .await;
    let legacy = server
        .mock("POST", API_PATH)
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::PartialJson(
            json!({"method": "host.get", "auth": "tok"}),
        ))
        .with_header("content-type", "application/json")
        .with_body(result_body(json!([])))
        .expect(2)
        .create_async()
        .await;

    let client = ZabbixClient::new(&token_config(&server)).unwrap();
    client.call("host.get", json!({})).await.unwrap();
    client.call("host.get", json!({})).await.unwrap();

    assert_eq!(
        client.auth_status().strategy,
        Some(AuthStrategy::LegacyBodyField)
    );
    bearer.assert_async().await;
    legacy.assert_async().await;
}

#[tokio::test]
async fn version_query_carries_no_credentials() {
    let mut server = Server::new_async().await;
    let version = mock_json(&mut server, "apiinfo.version")
        .match_header("authorization", Matcher::Missing)
        .with_body(result_body(json!("7.0.4")))
        .expect(1)
        .create_async()
        .await;

    let client = ZabbixClient::new(&token_config(&server)).unwrap();

    assert_eq!(client.api_version().await.unwrap(), "7.0.4");
    assert!(!client.auth_status().authenticated);
    version.assert_async().await;
}

#[tokio::test]
async fn concurrent_callers_share_one_login() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", API_PATH)
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::PartialJson(
            json!({"method": "user.login", "params": {"username": "Admin"}}),
        ))
        .with_header("content-type", "application/json")
        .with_body(result_body(json!("sess-1")))
        .expect(1)
        .create_async()
        .await;
    let hosts = mock_json(&mut server, "host.get")
        .match_header("authorization", "Bearer sess-1")
        .with_body(result_body(json!([])))
        .expect(8)
        .create_async()
        .await;

    let client = Arc::new(ZabbixClient::new(&password_config(&server)).unwrap());
    let calls = (0..8).map(|_| {
        let client = Arc::clone(&client);
        async move { client.call("host.get", json!({})).await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(Result::is_ok));
    login.assert_async().await;
    hosts.assert_async().await;
}

#[tokio::test]
async fn login_retries_with_legacy_parameter_names() {
    let mut server = Server::new_async().await;
    let modern = server
        .mock("POST", API_PATH)
        .match_body(Matcher::PartialJson(
            json!({"method": "user.login", "params": {"username": "Admin"}}),
        ))
        .with_header("content-type", "application/json")
        .with_body(error_body(
            -32602,
            "Invalid params.",
            "Invalid parameter \"/\": unexpected parameter \"username\".",
        ))
        .expect(1)
        .create_async()
        .await;
    let legacy = server
        .mock("POST", API_PATH)
        .match_body(Matcher::PartialJson(
            json!({"method": "user.login", "params": {"user": "Admin"}}),
        ))
        .with_header("content-type", "application/json")
        .with_body(result_body(json!("sess-legacy")))
        .expect(1)
        .create_async()
        .await;
    let probe = mock_json(&mut server, "hostgroup.get")
        .match_header("authorization", "Bearer sess-legacy")
        .with_body(result_body(json!([{"groupid": "2"}])))
        .expect(1)
        .create_async()
        .await;

    let client = ZabbixClient::new(&password_config(&server)).unwrap();
    client.ensure_authenticated().await.unwrap();
    // Already authenticated: no further probe
    client.ensure_authenticated().await.unwrap();

    modern.assert_async().await;
    legacy.assert_async().await;
    probe.assert_async().await;
}

#[tokio::test]
async fn expired_session_triggers_relogin_within_attempt_cap() {
    let mut server = Server::new_async().await;
    let login = mock_json(&mut server, "user.login")
        .with_body(result_body(json!("sess-1")))
        .expect(2)
        .create_async()
        .await;
    let bearer = mock_json(&mut server, "host.get")
        .match_header("authorization", "Bearer sess-1")
        .with_body(error_body(
            -32602,
            "Invalid params.",
            "Session terminated, re-login, please.",
        ))
        .expect(2)
        .create_async()
        .await;
    let legacy = server
        .mock("POST", API_PATH)
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::PartialJson(
            json!({"method": "host.get", "auth": "sess-1"}),
        ))
        .with_header("content-type", "application/json")
        .with_body(error_body(
            -32602,
            "Invalid params.",
            "Session terminated, re-login, please.",
        ))
        .expect(1)
        .create_async()
        .await;

    let client = ZabbixClient::new(&password_config(&server)).unwrap();
    let error = client.call("host.get", json!({})).await.unwrap_err();

    assert!(matches!(error, Error::Authentication { .. }));
    assert!(!error.to_string().contains("hunter2"));
    let status = client.auth_status();
    assert!(!status.authenticated);
    assert!(status.last_error.is_some());
    login.assert_async().await;
    bearer.assert_async().await;
    legacy.assert_async().await;
}

#[tokio::test]
async fn concurrent_rejections_share_one_relogin() {
    let mut server = Server::new_async().await;
    let logins = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&logins);
    let _login = mock_json(&mut server, "user.login")
        .with_body_from_request(move |_| {
            let issued = counter.fetch_add(1, Ordering::SeqCst) + 1;
            result_body(json!(format!("tok-{issued}"))).into_bytes()
        })
        .create_async()
        .await;
    let expired = error_body(
        -32602,
        "Invalid params.",
        "Session terminated, re-login, please.",
    );
    let _bearer_expired = mock_json(&mut server, "host.get")
        .match_header("authorization", "Bearer tok-1")
        .with_body(expired.clone())
        .create_async()
        .await;
    let _legacy_expired = server
        .mock("POST", API_PATH)
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::PartialJson(
            json!({"method": "host.get", "auth": "tok-1"}),
        ))
        .with_header("content-type", "application/json")
        .with_body(expired)
        .create_async()
        .await;
    let _bearer_fresh = mock_json(&mut server, "host.get")
        .match_header("authorization", Matcher::Regex("^Bearer tok-[2-9]$".to_string()))
        .with_body(result_body(json!([])))
        .create_async()
        .await;
    let _legacy_fresh = server
        .mock("POST", API_PATH)
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"method": "host.get"})),
            Matcher::Regex(r#""auth":"tok-[2-9]""#.to_string()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(result_body(json!([])))
        .create_async()
        .await;

    let client = Arc::new(ZabbixClient::new(&password_config(&server)).unwrap());
    let calls = (0..8).map(|_| {
        let client = Arc::clone(&client);
        async move { client.call("host.get", json!({})).await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(Result::is_ok), "{results:?}");
    assert_eq!(logins.load(Ordering::SeqCst), 2);
    assert!(client.auth_status().authenticated);
}

#[tokio::test]
async fn rejected_password_is_an_authentication_error() {
    let mut server = Server::new_async().await;
    let _login = mock_json(&mut server, "user.login")
        .with_body(error_body(
            -32500,
            "Application error.",
            "Incorrect user name or password or account is temporarily blocked.",
        ))
        .create_async()
        .await;

    let client = ZabbixClient::new(&password_config(&server)).unwrap();
    let error = client.ensure_authenticated().await.unwrap_err();

    match &error {
        Error::Authentication { message, .. } => {
            assert!(message.contains("Admin"));
            assert!(!message.contains("hunter2"));
        }
        other => panic!("Expected authentication error, got {other:?}"),
    }
    assert!(client.auth_status().last_error.is_some());
}

#[tokio::test]
async fn ordinary_upstream_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let create = mock_json(&mut server, "host.create")
        .with_body(error_body(
            -32602,
            "Invalid params.",
            "Host with the same name \"web-01\" already exists.",
        ))
        .expect(1)
        .create_async()
        .await;

    let client = ZabbixClient::new(&token_config(&server)).unwrap();
    let error = client
        .call("host.create", json!({"host": "web-01"}))
        .await
        .unwrap_err();

    match error {
        Error::Upstream {
            method, message, ..
        } => {
            assert_eq!(method, "host.create");
            assert!(message.contains("already exists"));
        }
        other => panic!("Expected upstream error, got {other:?}"),
    }
    create.assert_async().await;
}

#[tokio::test]
async fn http_errors_map_to_domain_errors() {
    let mut server = Server::new_async().await;
    let _unavailable = mock_json(&mut server, "apiinfo.version")
        .with_status(502)
        .create_async()
        .await;

    let client = ZabbixClient::new(&token_config(&server)).unwrap();
    let error = client.api_version().await.unwrap_err();

    assert!(matches!(error, Error::Network { .. }));
}

#[tokio::test]
async fn unreachable_upstream_is_a_network_error() {
    let config = UpstreamConfig {
        url: "http://127.0.0.1:1".to_string(),
        token: Some("tok".to_string()),
        user: None,
        password: None,
        timeout_secs: 2,
    };
    let client = ZabbixClient::new(&config).unwrap();

    let error = client.call("host.get", json!({})).await.unwrap_err();

    assert!(matches!(error, Error::Network { .. }));
    assert!(error.is_upstream());
}
