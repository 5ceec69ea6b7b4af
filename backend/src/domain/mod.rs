//! Domain primitives, ports, and workflow services.
//!
//! Purpose: hold the admission engine proper — participant records, the
//! slot allocator, the household deduplicator, credential issuance, and the
//! registration/redemption workflows — free of transport and storage
//! concerns. Adapters reach the domain only through the port traits in
//! [`ports`].

pub mod admission;
pub mod credentials;
pub mod error;
pub mod participant;
pub mod ports;
pub mod schedule;
pub mod slots;

pub use self::admission::{
    AdmissionService, RedemptionReceipt, RegistrationError, RedemptionError,
};
pub use self::credentials::{IssuedCredentials, Token, TokenValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::participant::{HouseholdKey, Participant, RegistrationDraft};
pub use self::schedule::{EventSchedule, EventScheduleError};
