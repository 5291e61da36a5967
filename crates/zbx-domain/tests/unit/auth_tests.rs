//! Unit tests for authentication value objects

use zbx_domain::{AuthStatus, AuthStrategy, Credentials};

#[test]
fn test_credentials_debug_redacts_secrets() {
    let token = Credentials::Token("s3cr3t-token".to_string());
    let password = Credentials::Password {
        user: "Admin".to_string(),
        password: "zabbix".to_string(),
    };

    let token_debug = format!("{token:?}");
    let password_debug = format!("{password:?}");

    assert!(!token_debug.contains("s3cr3t-token"));
    assert!(password_debug.contains("Admin"));
    assert!(!password_debug.contains("zabbix"));
}

#[test]
fn test_only_password_credentials_can_relogin() {
    assert!(!Credentials::Token("t".to_string()).can_relogin());
    assert!(
        Credentials::Password {
            user: "u".to_string(),
            password: "p".to_string()
        }
        .can_relogin()
    );
}

#[test]
fn test_strategy_sequence_starts_from_preferred() {
    let from_bearer: Vec<_> = AuthStrategy::sequence_from(AuthStrategy::BearerHeader).collect();
    assert_eq!(
        from_bearer,
        vec![AuthStrategy::BearerHeader, AuthStrategy::LegacyBodyField]
    );

    let from_legacy: Vec<_> = AuthStrategy::sequence_from(AuthStrategy::LegacyBodyField).collect();
    assert_eq!(
        from_legacy,
        vec![AuthStrategy::LegacyBodyField, AuthStrategy::BearerHeader]
    );
}

#[test]
fn test_auth_status_serializes_strategy_in_snake_case() {
    let status = AuthStatus {
        authenticated: true,
        strategy: Some(AuthStrategy::LegacyBodyField),
        last_error: None,
    };
    let json = serde_json::to_value(&status).expect("serialize");
    assert_eq!(json["strategy"], "legacy_body_field");
    assert_eq!(json["authenticated"], true);
    assert!(!AuthStatus::unauthenticated().authenticated);
}
