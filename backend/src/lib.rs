//! Timed-admission registration and token-redemption service.
//!
//! Households register for an hourly time slot on the event date and receive
//! a one-time admission token. A gate operator redeems the token exactly
//! once at the door. The domain layer owns all invariants (per-hour
//! capacity, one registration per household, exactly-once redemption);
//! inbound and outbound adapters stay thin.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
