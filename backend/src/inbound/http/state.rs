//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AdmissionPort, TokenImageEncoder};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and redemption workflows.
    pub admission: Arc<dyn AdmissionPort>,
    /// Optional token-to-image rendering for registration confirmations.
    pub token_images: Arc<dyn TokenImageEncoder>,
    /// Shared secret gating the redemption endpoint. `None` leaves the
    /// endpoint open, for single-operator deployments on a trusted network.
    pub operator_key: Option<String>,
}

impl HttpState {
    /// Construct state over an admission port with no image pipeline and no
    /// operator gate.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use guichet::domain::{AdmissionService, EventSchedule};
    /// use guichet::inbound::http::state::HttpState;
    /// use guichet::outbound::persistence::JsonParticipantRepository;
    ///
    /// let schedule = EventSchedule::new(
    ///     chrono::NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
    ///     9,
    ///     21,
    ///     40,
    ///     499,
    /// )
    /// .unwrap();
    /// let repository = Arc::new(JsonParticipantRepository::new("data/participants.json"));
    /// let state = HttpState::new(Arc::new(AdmissionService::new(repository, schedule)));
    /// ```
    pub fn new(admission: Arc<dyn AdmissionPort>) -> Self {
        Self {
            admission,
            token_images: Arc::new(crate::domain::ports::NullTokenImageEncoder),
            operator_key: None,
        }
    }

    /// Require the given operator key on redemption requests.
    pub fn with_operator_key(mut self, key: impl Into<String>) -> Self {
        self.operator_key = Some(key.into());
        self
    }

    /// Render registration tokens through the given encoder.
    pub fn with_token_images(mut self, encoder: Arc<dyn TokenImageEncoder>) -> Self {
        self.token_images = encoder;
        self
    }
}
