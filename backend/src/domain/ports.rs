//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the participant store, the token image encoder) and how inbound
//! adapters drive the workflows. Each trait exposes strongly typed errors
//! so adapters map their failures into predictable variants.

use async_trait::async_trait;
use thiserror::Error;

use super::admission::{RedemptionReceipt, RegistrationError, RedemptionError};
use super::participant::{Participant, RegistrationDraft};

/// Errors surfaced by participant store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParticipantRepositoryError {
    /// The backing store could not be read.
    #[error("participant store read failed: {message}")]
    Io {
        /// Adapter-level failure description.
        message: String,
    },
    /// A write could not be completed. Never self-healed; the caller must
    /// see this so no accepted registration or redemption is silently lost.
    #[error("participant store write failed: {message}")]
    Write {
        /// Adapter-level failure description.
        message: String,
    },
}

impl ParticipantRepositoryError {
    /// Helper for read failures.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Helper for write failures.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Persistence port for the participant collection.
///
/// `save_all` fully replaces prior content; the workflows hold their
/// critical section across a paired `load_all`/`save_all`, so adapters only
/// need to make the replace itself atomic with respect to readers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Load the entire participant collection.
    ///
    /// A missing, empty, or corrupt backing representation yields an empty
    /// collection (self-heal), never an error; only genuine I/O failures
    /// surface as [`ParticipantRepositoryError::Io`].
    async fn load_all(&self) -> Result<Vec<Participant>, ParticipantRepositoryError>;

    /// Replace the stored collection with `participants`.
    async fn save_all(
        &self,
        participants: &[Participant],
    ) -> Result<(), ParticipantRepositoryError>;
}

/// Driving port for the two admission workflows.
///
/// HTTP handlers depend on this trait rather than on the concrete service
/// so they stay testable with mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdmissionPort: Send + Sync {
    /// Register a household and issue its admission token.
    async fn register(
        &self,
        draft: RegistrationDraft,
    ) -> Result<Participant, RegistrationError>;

    /// Redeem an admission token exactly once.
    async fn redeem(&self, token: &str) -> Result<RedemptionReceipt, RedemptionError>;
}

/// Presentation collaborator turning a token into a scannable image.
///
/// Pure presentation with no domain logic; the production wiring may use
/// the no-op implementation and let a front end render the token itself.
pub trait TokenImageEncoder: Send + Sync {
    /// Render the token as a data-URL image, if the encoder supports it.
    fn encode(&self, token: &str) -> Option<String>;
}

/// No-op encoder used when no image pipeline is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTokenImageEncoder;

impl TokenImageEncoder for NullTokenImageEncoder {
    fn encode(&self, _token: &str) -> Option<String> {
        None
    }
}
