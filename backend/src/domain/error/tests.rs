//! Serialisation and conversion coverage for the error payload.

use rstest::rstest;
use serde_json::{json, Value};

use super::*;

#[rstest]
#[case(Error::invalid_request("bad"), "invalid_request")]
#[case(Error::invalid_credentials("no"), "invalid_credentials")]
#[case(Error::not_authenticated("login"), "not_authenticated")]
#[case(Error::duplicate_email("taken"), "duplicate_email")]
#[case(Error::invalid_style_set("blink"), "invalid_style_set")]
#[case(Error::index_out_of_range("oob"), "index_out_of_range")]
#[case(Error::internal("boom"), "internal_error")]
fn error_codes_serialise_as_snake_case(#[case] error: Error, #[case] expected: &str) {
    let value = serde_json::to_value(&error).expect("serialise");
    assert_eq!(value.get("code").and_then(Value::as_str), Some(expected));
}

#[test]
fn absent_optional_fields_are_omitted_from_the_payload() {
    let value = serde_json::to_value(Error::invalid_request("bad")).expect("serialise");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[test]
fn details_round_trip() {
    let error = Error::duplicate_email("taken").with_details(json!({ "field": "email" }));
    let value = serde_json::to_value(&error).expect("serialise");
    assert_eq!(
        value
            .get("details")
            .and_then(|details| details.get("field"))
            .and_then(Value::as_str),
        Some("email")
    );
}

#[test]
fn unknown_style_maps_to_invalid_style_set_with_the_offender_named() {
    let error = Error::from(RichTextError::UnknownStyle {
        style: "blink".to_owned(),
    });
    assert_eq!(error.code(), ErrorCode::InvalidStyleSet);
    assert_eq!(
        error
            .details()
            .and_then(|details| details.get("style"))
            .and_then(Value::as_str),
        Some("blink")
    );
}

#[test]
fn empty_run_contract_violations_map_to_invalid_request() {
    assert_eq!(
        Error::from(RichTextError::EmptyRunSequence).code(),
        ErrorCode::InvalidRequest
    );
    assert_eq!(
        Error::from(RichTextError::EmptyRunText).code(),
        ErrorCode::InvalidRequest
    );
}
