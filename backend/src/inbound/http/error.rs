//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error types HTTP-agnostic while allowing Actix
//! handlers to turn workflow failures into consistent JSON responses and
//! status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{Error, ErrorCode, RedemptionError, RegistrationError};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

impl From<RegistrationError> for Error {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::MissingField { field } => {
                Error::invalid_request(format!("required field {field} is missing"))
                    .with_details(json!({ "field": field, "code": "missing_field" }))
            }
            RegistrationError::DuplicateHousehold => {
                Error::conflict("this household is already registered")
                    .with_details(json!({ "code": "duplicate_household" }))
            }
            RegistrationError::CapacityExhausted => {
                Error::conflict("all time slots are full")
                    .with_details(json!({ "code": "capacity_exhausted" }))
            }
            RegistrationError::Store(store) => {
                error!(error = %store, "participant store failure during registration");
                Error::service_unavailable("participant store unavailable")
            }
        }
    }
}

impl From<RedemptionError> for Error {
    fn from(err: RedemptionError) -> Self {
        match err {
            RedemptionError::MissingToken => {
                Error::invalid_request("admission token must not be empty")
                    .with_details(json!({ "field": "token", "code": "missing_token" }))
            }
            RedemptionError::InvalidToken { remaining } => {
                Error::not_found("unknown admission token")
                    .with_details(json!({ "code": "invalid_token", "remaining": remaining }))
            }
            RedemptionError::AlreadyRedeemed { remaining } => {
                Error::conflict("admission token already redeemed")
                    .with_details(json!({ "code": "already_redeemed", "remaining": remaining }))
            }
            RedemptionError::CodesExhausted => {
                Error::conflict("no admission codes remaining")
                    .with_details(json!({ "code": "codes_exhausted", "remaining": 0 }))
            }
            RedemptionError::Store(store) => {
                error!(error = %store, "participant store failure during redemption");
                Error::service_unavailable("participant store unavailable")
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
