//! Environment-driven application configuration.
//!
//! Every knob has a default suited to a single-day event, so a bare
//! `guichet` invocation serves the standard schedule out of the box.

use std::env;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::domain::{EventSchedule, EventScheduleError};

/// Configuration failures reported at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse.
    #[error("invalid value for {name}: {message}")]
    InvalidValue {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Parser failure description.
        message: String,
    },
    /// The configured hours, capacity, or code budget form no valid
    /// schedule.
    #[error(transparent)]
    Schedule(#[from] EventScheduleError),
}

/// Runtime settings assembled from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds, from `BIND_ADDR`.
    pub bind_addr: String,
    /// Path of the JSON participant store, from `DATA_FILE`.
    pub data_file: PathBuf,
    /// Date of the event, from `EVENT_DATE` (defaults to today).
    pub event_date: NaiveDate,
    /// First admission hour, from `START_HOUR`.
    pub start_hour: u8,
    /// Hour after the last admission hour, from `END_HOUR`.
    pub end_hour: u8,
    /// Registrations admitted per hour, from `CAPACITY_PER_HOUR`.
    pub capacity_per_hour: u32,
    /// Global redemption budget, from `MAX_CODES`.
    pub max_codes: u32,
    /// Shared secret for the redemption endpoint, from `OPERATOR_KEY`.
    /// Unset leaves the endpoint open.
    pub operator_key: Option<String>,
}

fn parse_value<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|err: T::Err| ConfigError::InvalidValue {
                name,
                message: err.to_string(),
            }),
        None => Ok(default),
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

impl AppConfig {
    /// Assemble configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when a set variable fails to
    /// parse; unset variables fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned()),
            data_file: parse_value(
                "DATA_FILE",
                env::var("DATA_FILE").ok(),
                PathBuf::from("data/participants.json"),
            )?,
            event_date: parse_value(
                "EVENT_DATE",
                env::var("EVENT_DATE").ok(),
                Local::now().date_naive(),
            )?,
            start_hour: parse_value("START_HOUR", env::var("START_HOUR").ok(), 9)?,
            end_hour: parse_value("END_HOUR", env::var("END_HOUR").ok(), 21)?,
            capacity_per_hour: parse_value(
                "CAPACITY_PER_HOUR",
                env::var("CAPACITY_PER_HOUR").ok(),
                40,
            )?,
            max_codes: parse_value("MAX_CODES", env::var("MAX_CODES").ok(), 499)?,
            operator_key: non_empty(env::var("OPERATOR_KEY").ok()),
        })
    }

    /// Validate the configured hours and budgets into an [`EventSchedule`].
    pub fn schedule(&self) -> Result<EventSchedule, ConfigError> {
        Ok(EventSchedule::new(
            self.event_date,
            self.start_hour,
            self.end_hour,
            self.capacity_per_hour,
            self.max_codes,
        )?)
    }
}
