//! Tool argument validation and schema tests

use serde_json::json;
use validator::Validate;
use zbx_server::args::{EventAcknowledgeArgs, HistoryGetArgs, HostGetArgs, MAX_LIMIT};

#[test]
fn limit_bounds_are_enforced() {
    let ok: HostGetArgs = serde_json::from_value(json!({"limit": MAX_LIMIT})).unwrap();
    assert!(ok.validate().is_ok());

    let too_big: HostGetArgs = serde_json::from_value(json!({"limit": MAX_LIMIT + 1})).unwrap();
    assert!(too_big.validate().is_err());
}

#[test]
fn negative_limit_does_not_deserialize() {
    assert!(serde_json::from_value::<HostGetArgs>(json!({"limit": -1})).is_err());
}

#[test]
fn empty_search_is_rejected() {
    let args: HostGetArgs = serde_json::from_value(json!({"search": ""})).unwrap();
    assert!(args.validate().is_err());
}

#[test]
fn history_requires_items() {
    let args: HistoryGetArgs = serde_json::from_value(json!({"itemids": []})).unwrap();
    assert!(args.validate().is_err());
    assert!(serde_json::from_value::<HistoryGetArgs>(json!({})).is_err());
}

#[test]
fn acknowledge_close_defaults_to_false() {
    let args: EventAcknowledgeArgs =
        serde_json::from_value(json!({"eventids": ["501"]})).unwrap();
    assert!(!args.close);
    assert!(args.validate().is_ok());
}

#[test]
fn schema_carries_field_descriptions() {
    let schema = serde_json::to_value(schemars::schema_for!(HostGetArgs)).unwrap();
    let properties = &schema["properties"];
    for field in ["hostids", "groupids", "search", "limit"] {
        assert!(
            properties[field]["description"].is_string(),
            "{field} has no description"
        );
    }
}
