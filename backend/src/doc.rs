//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API: the registration and redemption
//! endpoints, the health probes, and the shared error envelope. The
//! generated document is consumed by external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::redemptions::{RedemptionRequest, RedemptionResponse};
use crate::inbound::http::registrations::{RegistrationRequest, RegistrationResponse};

/// Enrich the generated document with the operator key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "OperatorKey",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Operator-Key",
                "Shared secret required on redemption requests when configured.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Guichet admission API",
        description = "HTTP interface for timed-admission registration, token redemption, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::registrations::create_registration,
        crate::inbound::http::redemptions::create_redemption,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegistrationRequest,
        RegistrationResponse,
        RedemptionRequest,
        RedemptionResponse,
    )),
    tags(
        (name = "registrations", description = "Household registration and token issuance"),
        (name = "redemptions", description = "Gate-side token redemption"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
