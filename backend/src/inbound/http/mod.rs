//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod redemptions;
pub mod registrations;
pub mod state;

pub use error::ApiResult;
