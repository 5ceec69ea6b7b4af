//! Pure allocation helpers over the participant snapshot.
//!
//! Everything here is a function of its arguments: no clock, no I/O, no
//! hidden state. The workflows call these inside their critical section so
//! the snapshot they see is the one they mutate.

use std::collections::HashMap;

use chrono::{NaiveDateTime, Timelike};

use super::participant::{HouseholdKey, Participant};
use super::schedule::EventSchedule;

/// Next hourly slot with free capacity, or `None` when every hour is full.
///
/// Hours are scanned in ascending order from the schedule's opening hour;
/// the earliest available hour always wins. Registrations for other dates
/// never count against the event date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use guichet::domain::EventSchedule;
/// use guichet::domain::slots::next_available_slot;
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 27).expect("valid date");
/// let schedule = EventSchedule::new(date, 9, 21, 40, 499).expect("valid schedule");
/// let slot = next_available_slot(&[], &schedule).expect("capacity available");
/// assert_eq!(slot.to_string(), "2026-08-27 09:00:00");
/// ```
pub fn next_available_slot(
    participants: &[Participant],
    schedule: &EventSchedule,
) -> Option<NaiveDateTime> {
    let mut per_hour: HashMap<u32, u32> = HashMap::new();
    for participant in participants {
        if participant.slot_time.date() == schedule.event_date() {
            *per_hour.entry(participant.slot_time.hour()).or_insert(0) += 1;
        }
    }

    schedule
        .hours()
        .find(|hour| {
            per_hour.get(&u32::from(*hour)).copied().unwrap_or(0) < schedule.capacity_per_hour()
        })
        .and_then(|hour| schedule.slot_at(hour))
}

/// Whether the household already holds a registration.
pub fn household_is_registered(participants: &[Participant], key: &HouseholdKey) -> bool {
    participants
        .iter()
        .any(|participant| &participant.household_key == key)
}

/// Number of successfully redeemed tokens in the snapshot.
pub fn redeemed_count(participants: &[Participant]) -> u32 {
    let count = participants
        .iter()
        .filter(|participant| participant.checked_in)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Remaining global capacity: `max_codes` minus redeemed tokens.
pub fn remaining_codes(participants: &[Participant], schedule: &EventSchedule) -> u32 {
    schedule
        .max_codes()
        .saturating_sub(redeemed_count(participants))
}

#[cfg(test)]
#[path = "slots_tests.rs"]
mod tests;
