//! Event schedule: the immutable capacity configuration.
//!
//! A single [`EventSchedule`] value is loaded at startup and passed into the
//! allocator and workflows, replacing any notion of process-wide mutable
//! configuration.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Immutable admission configuration for one event day.
///
/// ## Invariants
/// - `start_hour < end_hour <= 24`.
/// - `capacity_per_hour >= 1` and `max_codes >= 1`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use guichet::domain::EventSchedule;
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 27).expect("valid date");
/// let schedule = EventSchedule::new(date, 9, 21, 40, 499).expect("valid schedule");
/// assert_eq!(schedule.hours().count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSchedule {
    event_date: NaiveDate,
    start_hour: u8,
    end_hour: u8,
    capacity_per_hour: u32,
    max_codes: u32,
}

/// Validation errors returned by [`EventSchedule::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventScheduleError {
    /// The opening hour does not precede the closing hour.
    #[error("start hour {start} must precede end hour {end}")]
    EmptyHourRange {
        /// Configured opening hour.
        start: u8,
        /// Configured closing hour.
        end: u8,
    },
    /// The closing hour runs past the end of the day.
    #[error("end hour {end} must not exceed 24")]
    HourPastMidnight {
        /// Configured closing hour.
        end: u8,
    },
    /// Hourly capacity must admit at least one household.
    #[error("capacity per hour must be at least 1")]
    ZeroCapacity,
    /// The global code budget must admit at least one redemption.
    #[error("max codes must be at least 1")]
    ZeroMaxCodes,
}

impl EventSchedule {
    /// Validate and construct a schedule.
    pub fn new(
        event_date: NaiveDate,
        start_hour: u8,
        end_hour: u8,
        capacity_per_hour: u32,
        max_codes: u32,
    ) -> Result<Self, EventScheduleError> {
        if end_hour > 24 {
            return Err(EventScheduleError::HourPastMidnight { end: end_hour });
        }
        if start_hour >= end_hour {
            return Err(EventScheduleError::EmptyHourRange {
                start: start_hour,
                end: end_hour,
            });
        }
        if capacity_per_hour == 0 {
            return Err(EventScheduleError::ZeroCapacity);
        }
        if max_codes == 0 {
            return Err(EventScheduleError::ZeroMaxCodes);
        }
        Ok(Self {
            event_date,
            start_hour,
            end_hour,
            capacity_per_hour,
            max_codes,
        })
    }

    /// The event date every slot falls on.
    pub fn event_date(&self) -> NaiveDate {
        self.event_date
    }

    /// First admissible hour of the day.
    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    /// First hour past the admissible range.
    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Households admitted per hourly slot.
    pub fn capacity_per_hour(&self) -> u32 {
        self.capacity_per_hour
    }

    /// Global budget of redeemable codes.
    pub fn max_codes(&self) -> u32 {
        self.max_codes
    }

    /// Admissible hours in ascending order.
    pub fn hours(&self) -> std::ops::Range<u8> {
        self.start_hour..self.end_hour
    }

    /// Timestamp of the slot starting at `hour` on the event date.
    ///
    /// Returns `None` for hours outside `0..24`; all hours produced by
    /// [`Self::hours`] are valid.
    pub fn slot_at(&self, hour: u8) -> Option<NaiveDateTime> {
        self.event_date.and_hms_opt(u32::from(hour), 0, 0)
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
