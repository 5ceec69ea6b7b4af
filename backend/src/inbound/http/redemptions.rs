//! Redemption API handlers.
//!
//! ```text
//! POST /api/v1/redemptions {"token":"3f7a1c9e..."}
//! ```
//!
//! When an operator key is configured, requests must carry it in the
//! `X-Operator-Key` header.

use actix_web::{HttpRequest, HttpResponse, post, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, RedemptionReceipt};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// HTTP header carrying the shared operator secret.
pub const OPERATOR_KEY_HEADER: &str = "X-Operator-Key";

/// Redemption request body for `POST /api/v1/redemptions`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RedemptionRequest {
    /// Admission token presented at the gate.
    pub token: String,
}

/// Redemption confirmation shown to the gate operator.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionResponse {
    /// Participant display name, for a quick identity check.
    pub full_name: String,
    /// Slot the participant registered for.
    pub slot_time: NaiveDateTime,
    /// Slot formatted for display, e.g. `09:00`.
    pub slot_label: String,
    /// Admission codes still available after this redemption.
    pub remaining: u32,
}

impl From<RedemptionReceipt> for RedemptionResponse {
    fn from(receipt: RedemptionReceipt) -> Self {
        Self {
            full_name: receipt.full_name,
            slot_label: receipt.slot_time.format("%H:%M").to_string(),
            slot_time: receipt.slot_time,
            remaining: receipt.remaining,
        }
    }
}

fn require_operator_key(state: &HttpState, request: &HttpRequest) -> Result<(), Error> {
    let Some(expected) = state.operator_key.as_deref() else {
        return Ok(());
    };
    let presented = request
        .headers()
        .get(OPERATOR_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented == Some(expected) {
        Ok(())
    } else {
        Err(Error::unauthorized("operator key missing or invalid"))
    }
}

/// Redeem an admission token exactly once and report remaining capacity.
#[utoipa::path(
    post,
    path = "/api/v1/redemptions",
    request_body = RedemptionRequest,
    responses(
        (status = 200, description = "Token redeemed", body = RedemptionResponse),
        (status = 400, description = "Missing token", body = Error),
        (status = 401, description = "Operator key missing or invalid", body = Error),
        (status = 404, description = "Unknown token", body = Error),
        (status = 409, description = "Token already redeemed or codes exhausted", body = Error),
        (status = 503, description = "Participant store unavailable", body = Error)
    ),
    tags = ["redemptions"],
    operation_id = "createRedemption",
    security(("OperatorKey" = []))
)]
#[post("/redemptions")]
pub async fn create_redemption(
    state: web::Data<HttpState>,
    request: HttpRequest,
    payload: web::Json<RedemptionRequest>,
) -> ApiResult<HttpResponse> {
    require_operator_key(&state, &request)?;
    let receipt = state.admission.redeem(&payload.token).await?;
    Ok(HttpResponse::Ok().json(RedemptionResponse::from(receipt)))
}

#[cfg(test)]
#[path = "redemptions_tests.rs"]
mod tests;
