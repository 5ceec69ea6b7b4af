//! Tests for the domain error envelope.

use rstest::rstest;
use serde_json::json;

use super::*;

#[test]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[test]
fn serializes_to_camel_case_envelope() {
    let err = Error::conflict("household already registered")
        .with_details(json!({ "code": "duplicate_household" }));

    let value = serde_json::to_value(&err).expect("serializes");
    assert_eq!(value["code"], "conflict");
    assert_eq!(value["message"], "household already registered");
    assert_eq!(value["details"]["code"], "duplicate_household");
}

#[test]
fn omits_details_when_absent() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serializes");
    assert!(value.get("details").is_none());
}

#[test]
fn round_trips_through_serde() {
    let err = Error::service_unavailable("store offline").with_details(json!({ "retry": true }));
    let raw = serde_json::to_string(&err).expect("serializes");
    let back: Error = serde_json::from_str(&raw).expect("deserializes");
    assert_eq!(back, err);
}

#[rstest]
#[case::invalid_request(ErrorCode::InvalidRequest, "invalid_request")]
#[case::unauthorized(ErrorCode::Unauthorized, "unauthorized")]
#[case::not_found(ErrorCode::NotFound, "not_found")]
#[case::conflict(ErrorCode::Conflict, "conflict")]
#[case::service_unavailable(ErrorCode::ServiceUnavailable, "service_unavailable")]
#[case::internal(ErrorCode::InternalError, "internal_error")]
fn error_codes_use_snake_case_wire_names(#[case] code: ErrorCode, #[case] expected: &str) {
    let value = serde_json::to_value(code).expect("serializes");
    assert_eq!(value, json!(expected));
}
