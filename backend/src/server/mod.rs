//! Server construction and wiring.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::domain::AdmissionService;
use crate::domain::ports::AdmissionPort;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::redemptions::create_redemption;
use crate::inbound::http::registrations::create_registration;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::JsonParticipantRepository;

/// Mount the API scope and health probes onto an Actix app.
///
/// Shared between the production server and integration tests so both
/// exercise identical routing.
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    state: web::Data<HttpState>,
    health: web::Data<HealthState>,
) {
    cfg.app_data(state)
        .app_data(health)
        .service(
            web::scope("/api/v1")
                .service(create_registration)
                .service(create_redemption),
        )
        .service(ready)
        .service(live);
}

/// Wire the store, workflows, and HTTP server, then serve until shutdown.
///
/// # Errors
/// Propagates [`std::io::Error`] when the schedule is invalid, the socket
/// cannot be bound, or the server fails while running.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let schedule = config.schedule().map_err(std::io::Error::other)?;
    let repository = Arc::new(JsonParticipantRepository::new(&config.data_file));
    let admission: Arc<dyn AdmissionPort> = Arc::new(AdmissionService::new(repository, schedule));

    let mut state = HttpState::new(admission);
    if let Some(key) = config.operator_key.clone() {
        state = state.with_operator_key(key);
    }
    let state = web::Data::new(state);
    let health = web::Data::new(HealthState::new());

    let server_state = state.clone();
    let server_health = health.clone();
    let server = HttpServer::new(move || {
        let state = server_state.clone();
        let health = server_health.clone();
        App::new().configure(move |cfg| configure_app(cfg, state, health))
    })
    .bind(config.bind_addr.as_str())?
    .run();

    info!(addr = %config.bind_addr, data_file = %config.data_file.display(), "admission server listening");
    health.mark_ready();
    server.await
}
