//! Admission workflows: registration and redemption.
//!
//! Both workflows read, check, mutate, and persist the participant
//! collection as one unit under a single mutex, so concurrent signups and
//! scans serialize on the shared store. This is what upholds household
//! uniqueness, per-hour capacity, and exactly-once redemption when two
//! requests race.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use super::credentials::IssuedCredentials;
use super::participant::{HouseholdKey, Participant, RegistrationDraft};
use super::ports::{AdmissionPort, ParticipantRepository, ParticipantRepositoryError};
use super::schedule::EventSchedule;
use super::slots::{household_is_registered, next_available_slot, remaining_codes};

/// Failures of the registration workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A required field was empty; user-correctable.
    #[error("required field {field} is missing")]
    MissingField {
        /// Wire name of the offending field.
        field: &'static str,
    },
    /// The household already holds a registration; non-retryable without
    /// changing inputs.
    #[error("household is already registered")]
    DuplicateHousehold,
    /// Every hourly slot is at capacity.
    #[error("all time slots are full")]
    CapacityExhausted,
    /// The participant store failed underneath the workflow.
    #[error(transparent)]
    Store(#[from] ParticipantRepositoryError),
}

/// Failures of the redemption workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedemptionError {
    /// No token was presented.
    #[error("missing admission token")]
    MissingToken,
    /// The token matches no issued registration.
    #[error("unknown admission token")]
    InvalidToken {
        /// Remaining global capacity at the time of the attempt.
        remaining: u32,
    },
    /// The token was already redeemed; tokens are single-use.
    #[error("admission token already redeemed")]
    AlreadyRedeemed {
        /// Remaining global capacity at the time of the attempt.
        remaining: u32,
    },
    /// The global code budget is consumed; no further redemption may
    /// succeed.
    #[error("no admission codes remaining")]
    CodesExhausted,
    /// The participant store failed underneath the workflow.
    #[error(transparent)]
    Store(#[from] ParticipantRepositoryError),
}

/// Outcome of a successful redemption, for operator display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionReceipt {
    /// Participant display name.
    pub full_name: String,
    /// Slot the participant was assigned at registration.
    pub slot_time: NaiveDateTime,
    /// Remaining global capacity after this redemption.
    pub remaining: u32,
}

/// Admission service owning both workflows and the store critical section.
///
/// One instance is shared by every transport worker; `store_lock` spans the
/// whole load-check-mutate-persist sequence of each operation, so store I/O
/// is the only blocking step inside the critical section.
pub struct AdmissionService<R> {
    repository: Arc<R>,
    schedule: EventSchedule,
    store_lock: Mutex<()>,
}

impl<R> AdmissionService<R> {
    /// Create the service over a participant repository and the event
    /// schedule loaded at startup.
    pub fn new(repository: Arc<R>, schedule: EventSchedule) -> Self {
        Self {
            repository,
            schedule,
            store_lock: Mutex::new(()),
        }
    }

    /// The immutable schedule this service admits against.
    pub fn schedule(&self) -> &EventSchedule {
        &self.schedule
    }
}

fn required_field(
    value: &str,
    field: &'static str,
) -> Result<String, RegistrationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

fn optional_field(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

#[async_trait]
impl<R> AdmissionPort for AdmissionService<R>
where
    R: ParticipantRepository,
{
    async fn register(
        &self,
        draft: RegistrationDraft,
    ) -> Result<Participant, RegistrationError> {
        // Defensive re-validation; the transport layer has first crack.
        let full_name = required_field(&draft.full_name, "fullName")?;
        let phone = required_field(&draft.phone, "phone")?;
        let zip_code = required_field(&draft.zip_code, "zipCode")?.to_uppercase();
        let civic_number = required_field(&draft.civic_number, "civicNumber")?;
        let email = optional_field(draft.email.as_deref());
        let apartment =
            optional_field(draft.apartment.as_deref()).map(|unit| unit.to_uppercase());

        let _guard = self.store_lock.lock().await;
        let mut participants = self.repository.load_all().await?;

        let household_key = HouseholdKey::derive(
            &zip_code,
            &civic_number,
            apartment.as_deref().unwrap_or(""),
        );
        if household_is_registered(&participants, &household_key) {
            return Err(RegistrationError::DuplicateHousehold);
        }

        let slot_time = next_available_slot(&participants, &self.schedule)
            .ok_or(RegistrationError::CapacityExhausted)?;
        let credentials = IssuedCredentials::issue();

        let participant = Participant {
            id: credentials.id,
            token: credentials.token,
            full_name,
            phone,
            email,
            zip_code,
            civic_number,
            apartment,
            household_key,
            slot_time,
            created_at: Utc::now(),
            checked_in: false,
        };

        // Nothing is persisted until every check has passed.
        participants.push(participant.clone());
        self.repository.save_all(&participants).await?;

        info!(
            participant_id = %participant.id,
            slot = %participant.slot_time,
            "registration accepted"
        );
        Ok(participant)
    }

    async fn redeem(&self, token: &str) -> Result<RedemptionReceipt, RedemptionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(RedemptionError::MissingToken);
        }

        let _guard = self.store_lock.lock().await;
        let mut participants = self.repository.load_all().await?;
        let remaining_before = remaining_codes(&participants, &self.schedule);

        let Some(participant) = participants
            .iter_mut()
            .find(|candidate| candidate.token.as_str() == token)
        else {
            return Err(RedemptionError::InvalidToken {
                remaining: remaining_before,
            });
        };

        if participant.checked_in {
            return Err(RedemptionError::AlreadyRedeemed {
                remaining: remaining_before,
            });
        }
        if remaining_before == 0 {
            return Err(RedemptionError::CodesExhausted);
        }

        participant.checked_in = true;
        let full_name = participant.full_name.clone();
        let slot_time = participant.slot_time;
        let participant_id = participant.id;

        self.repository.save_all(&participants).await?;
        let remaining = remaining_codes(&participants, &self.schedule);

        info!(%participant_id, remaining, "token redeemed");
        Ok(RedemptionReceipt {
            full_name,
            slot_time,
            remaining,
        })
    }
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod tests;
