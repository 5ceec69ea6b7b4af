//! Participant record and household identity.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::credentials::Token;

/// Normalized composite key enforcing one registration per residence.
///
/// Derived from postal code, civic number, and unit: every part is trimmed,
/// the postal code and unit are uppercased, and the parts are joined with
/// `|`. Two submissions for the same address therefore produce the same key
/// regardless of spacing or letter case.
///
/// # Examples
/// ```
/// use guichet::domain::HouseholdKey;
///
/// let a = HouseholdKey::derive("g2e 6j5", "2800", "");
/// let b = HouseholdKey::derive("G2E 6J5 ", " 2800", " ");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseholdKey(String);

impl HouseholdKey {
    /// Derive the key from raw address components.
    pub fn derive(zip_code: &str, civic_number: &str, apartment: &str) -> Self {
        Self(format!(
            "{}|{}|{}",
            zip_code.trim().to_uppercase(),
            civic_number.trim(),
            apartment.trim().to_uppercase(),
        ))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for HouseholdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw registration input as received from the transport layer.
///
/// Field validation happens inside the registration workflow, which
/// re-checks required fields defensively even when the caller has already
/// validated them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationDraft {
    /// Contact name, required.
    pub full_name: String,
    /// Contact phone number, required.
    pub phone: String,
    /// Contact email, optional.
    pub email: Option<String>,
    /// Postal code, required; part of the household key.
    pub zip_code: String,
    /// Civic number, required; part of the household key.
    pub civic_number: String,
    /// Apartment or unit, optional; part of the household key.
    pub apartment: Option<String>,
}

/// Durable participant record.
///
/// ## Invariants
/// - `household_key` and `token` are unique across the store.
/// - `slot_time` is immutable after creation and always falls on a whole
///   hour of the event date.
/// - `checked_in` transitions false→true at most once, never back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable internal identifier, generated at creation, never reused.
    pub id: Uuid,
    /// One-time redemption credential.
    pub token: Token,
    /// Contact name, informational.
    pub full_name: String,
    /// Contact phone, informational.
    pub phone: String,
    /// Contact email, informational.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Normalized postal code as submitted.
    pub zip_code: String,
    /// Civic number as submitted.
    pub civic_number: String,
    /// Normalized apartment or unit, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    /// Uniqueness key for the residence.
    pub household_key: HouseholdKey,
    /// Assigned hourly slot (event-local date and hour, minute `:00`).
    pub slot_time: NaiveDateTime,
    /// Creation timestamp, informational.
    pub created_at: DateTime<Utc>,
    /// Whether the token has been redeemed at the gate.
    pub checked_in: bool,
}

#[cfg(test)]
#[path = "participant_tests.rs"]
mod tests;
