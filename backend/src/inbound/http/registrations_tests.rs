//! Tests for the registration handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockAdmissionPort, TokenImageEncoder};
use crate::domain::{HouseholdKey, RegistrationError, Token};

struct FixtureImageEncoder;

impl TokenImageEncoder for FixtureImageEncoder {
    fn encode(&self, token: &str) -> Option<String> {
        Some(format!("data:image/png;base64,{token}"))
    }
}

fn sample_participant(token: &str) -> Participant {
    let slot = NaiveDate::from_ymd_opt(2026, 8, 27)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid slot timestamp");
    Participant {
        id: Uuid::new_v4(),
        token: Token::new(token).expect("valid token"),
        full_name: "Ada Lovelace".to_owned(),
        phone: "418-555-0199".to_owned(),
        email: None,
        zip_code: "G2E6J5".to_owned(),
        civic_number: "2800".to_owned(),
        apartment: None,
        household_key: HouseholdKey::derive("G2E6J5", "2800", ""),
        slot_time: slot,
        created_at: Utc::now(),
        checked_in: false,
    }
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").service(create_registration))
}

fn valid_body() -> Value {
    json!({
        "fullName": "Ada Lovelace",
        "phone": "418-555-0199",
        "zipCode": "G2E6J5",
        "civicNumber": "2800",
    })
}

#[actix_web::test]
async fn accepted_registration_returns_201_with_credentials() {
    let mut admission = MockAdmissionPort::new();
    admission
        .expect_register()
        .times(1)
        .return_once(|_| Ok(sample_participant("deadbeefdeadbeefdeadbeefdeadbeef")));

    let app = actix_test::init_service(test_app(HttpState::new(Arc::new(admission)))).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registrations")
            .set_json(valid_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("response JSON");
    assert_eq!(
        value.get("token").and_then(Value::as_str),
        Some("deadbeefdeadbeefdeadbeefdeadbeef")
    );
    assert_eq!(
        value.get("slotLabel").and_then(Value::as_str),
        Some("09:00")
    );
    assert_eq!(
        value.get("slotTime").and_then(Value::as_str),
        Some("2026-08-27T09:00:00")
    );
    assert!(value.get("tokenImage").is_none());
    assert!(value.get("slot_label").is_none());
}

#[actix_web::test]
async fn token_image_is_included_when_an_encoder_is_wired() {
    let mut admission = MockAdmissionPort::new();
    admission
        .expect_register()
        .times(1)
        .return_once(|_| Ok(sample_participant("cafe")));

    let state =
        HttpState::new(Arc::new(admission)).with_token_images(Arc::new(FixtureImageEncoder));
    let app = actix_test::init_service(test_app(state)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registrations")
            .set_json(valid_body())
            .to_request(),
    )
    .await;

    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("response JSON");
    assert_eq!(
        value.get("tokenImage").and_then(Value::as_str),
        Some("data:image/png;base64,cafe")
    );
}

#[actix_web::test]
async fn omitted_required_field_comes_back_as_a_structured_400() {
    let mut admission = MockAdmissionPort::new();
    admission
        .expect_register()
        .times(1)
        .return_once(|_| Err(RegistrationError::MissingField { field: "zipCode" }));

    let app = actix_test::init_service(test_app(HttpState::new(Arc::new(admission)))).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registrations")
            .set_json(json!({ "fullName": "Ada", "phone": "418-555-0199" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("error payload");
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    let details = value.get("details").expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some("zipCode"));
}

#[actix_web::test]
async fn duplicate_household_comes_back_as_409() {
    let mut admission = MockAdmissionPort::new();
    admission
        .expect_register()
        .times(1)
        .return_once(|_| Err(RegistrationError::DuplicateHousehold));

    let app = actix_test::init_service(test_app(HttpState::new(Arc::new(admission)))).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registrations")
            .set_json(valid_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("error payload");
    assert_eq!(
        value
            .get("details")
            .and_then(|d| d.get("code"))
            .and_then(Value::as_str),
        Some("duplicate_household")
    );
}

#[actix_web::test]
async fn exhausted_capacity_comes_back_as_409() {
    let mut admission = MockAdmissionPort::new();
    admission
        .expect_register()
        .times(1)
        .return_once(|_| Err(RegistrationError::CapacityExhausted));

    let app = actix_test::init_service(test_app(HttpState::new(Arc::new(admission)))).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registrations")
            .set_json(valid_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn request_fields_flow_into_the_draft_unchanged() {
    let mut admission = MockAdmissionPort::new();
    admission
        .expect_register()
        .times(1)
        .withf(|draft| {
            draft.full_name == "Ada Lovelace"
                && draft.email.as_deref() == Some("ada@example.com")
                && draft.apartment.as_deref() == Some("4")
        })
        .return_once(|_| Ok(sample_participant("cafe")));

    let app = actix_test::init_service(test_app(HttpState::new(Arc::new(admission)))).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/registrations")
            .set_json(json!({
                "fullName": "Ada Lovelace",
                "phone": "418-555-0199",
                "email": "ada@example.com",
                "zipCode": "G2E6J5",
                "civicNumber": "2800",
                "apartment": "4",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}
