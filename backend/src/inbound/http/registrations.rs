//! Registration API handlers.
//!
//! ```text
//! POST /api/v1/registrations {"fullName":"...","phone":"...","zipCode":"...","civicNumber":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Participant, RegistrationDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/registrations`.
///
/// All fields default to empty so that absent required fields reach domain
/// validation and come back as a structured `missing_field` error instead
/// of a deserialisation failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationRequest {
    /// Participant display name.
    pub full_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Postal code of the household address.
    pub zip_code: String,
    /// Civic (street) number of the household address.
    pub civic_number: String,
    /// Optional apartment or unit designation.
    pub apartment: Option<String>,
}

impl From<RegistrationRequest> for RegistrationDraft {
    fn from(value: RegistrationRequest) -> Self {
        Self {
            full_name: value.full_name,
            phone: value.phone,
            email: value.email,
            zip_code: value.zip_code,
            civic_number: value.civic_number,
            apartment: value.apartment,
        }
    }
}

/// Registration confirmation returned to the participant.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// Server-assigned participant identifier.
    pub id: Uuid,
    /// One-time admission token to present at the door.
    pub token: String,
    /// Assigned slot as a timestamp on the event date.
    pub slot_time: NaiveDateTime,
    /// Assigned slot formatted for display, e.g. `09:00`.
    pub slot_label: String,
    /// Token rendered as a data-URL image, when an encoder is wired in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_image: Option<String>,
}

fn confirmation(participant: &Participant, token_image: Option<String>) -> RegistrationResponse {
    RegistrationResponse {
        id: participant.id,
        token: participant.token.as_str().to_owned(),
        slot_time: participant.slot_time,
        slot_label: participant.slot_time.format("%H:%M").to_string(),
        token_image,
    }
}

/// Register a household for a time slot and issue its admission token.
#[utoipa::path(
    post,
    path = "/api/v1/registrations",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registration accepted", body = RegistrationResponse),
        (status = 400, description = "Missing required field", body = Error),
        (status = 409, description = "Household already registered or slots full", body = Error),
        (status = 503, description = "Participant store unavailable", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "createRegistration",
    security([])
)]
#[post("/registrations")]
pub async fn create_registration(
    state: web::Data<HttpState>,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let participant = state
        .admission
        .register(RegistrationDraft::from(payload.into_inner()))
        .await?;
    let token_image = state.token_images.encode(participant.token.as_str());
    Ok(HttpResponse::Created().json(confirmation(&participant, token_image)))
}

#[cfg(test)]
#[path = "registrations_tests.rs"]
mod tests;
