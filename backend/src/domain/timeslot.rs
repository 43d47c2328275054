//! Dock timeslots and the recurring schedule that generates them.
//!
//! A timeslot is a fixed dock/time window with a maximum concurrent booking
//! count. Slots are generated in bulk over a date range and never mutated
//! individually; regeneration replaces future slots wholesale.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::booking::BookingDetails;

/// A bookable dock/time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Timeslot {
    /// Sequential identifier.
    pub id: i64,
    /// Owning dock.
    pub dock_id: i64,
    /// Start instant (inclusive).
    pub start_at: DateTime<Utc>,
    /// End instant (exclusive).
    pub end_at: DateTime<Utc>,
    /// Concurrent bookings allowed.
    pub capacity: u32,
}

/// A timeslot annotated with its live booking load.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeslotSummary {
    /// The underlying slot.
    #[serde(flatten)]
    pub timeslot: Timeslot,
    /// Active (non-cancelled) bookings on the slot, joined with details.
    pub bookings: Vec<BookingDetails>,
    /// `capacity − active bookings`, floored at zero.
    pub available_capacity: u32,
    /// Whether no further bookings can be admitted.
    pub is_full: bool,
}

/// Recurring generation rules: working window, granularity, and capacity.
///
/// The defaults encode the warehouse policy: half-hour slots between 07:00
/// and 19:00 local time, two concurrent bookings on weekdays and one on
/// weekends. A slot is emitted only when it starts strictly before closing
/// time, so a final partial window is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSchedule {
    /// First slot starts at this local hour.
    pub opening_hour: u32,
    /// No slot starts at or after this local hour.
    pub closing_hour: u32,
    /// Slot length in minutes.
    pub slot_minutes: i64,
    /// Capacity on Monday through Friday.
    pub weekday_capacity: u32,
    /// Capacity on Saturday and Sunday.
    pub weekend_capacity: u32,
}

impl Default for SlotSchedule {
    fn default() -> Self {
        Self {
            opening_hour: 7,
            closing_hour: 19,
            slot_minutes: 30,
            weekday_capacity: 2,
            weekend_capacity: 1,
        }
    }
}

impl SlotSchedule {
    /// Capacity applicable to the given local day of week.
    pub fn capacity_for(&self, weekday: Weekday) -> u32 {
        match weekday {
            Weekday::Sat | Weekday::Sun => self.weekend_capacity,
            _ => self.weekday_capacity,
        }
    }

    /// Start/end instant pairs for one calendar day in the given zone.
    ///
    /// Conversion happens once at the window edges; slots advance in instant
    /// space, so a daylight-saving transition inside the window shortens or
    /// lengthens the emitted set rather than duplicating wall-clock times.
    pub fn day_windows(&self, day: NaiveDate, tz: Tz) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        let Some(open_local) = day.and_hms_opt(self.opening_hour, 0, 0) else {
            return Vec::new();
        };
        let Some(close_local) = day.and_hms_opt(self.closing_hour, 0, 0) else {
            return Vec::new();
        };
        let (Some(open), Some(close)) = (
            tz.from_local_datetime(&open_local).earliest(),
            tz.from_local_datetime(&close_local).earliest(),
        ) else {
            return Vec::new();
        };

        let open = open.with_timezone(&Utc);
        let close = close.with_timezone(&Utc);
        let step = Duration::minutes(self.slot_minutes);

        let mut windows = Vec::new();
        let mut slot_start = open;
        while slot_start < close {
            let slot_end = slot_start + step;
            windows.push((slot_start, slot_end));
            slot_start = slot_end;
        }
        windows
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn full_day_yields_twenty_four_half_hour_slots() {
        let schedule = SlotSchedule::default();
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date");
        let windows = schedule.day_windows(day, chrono_tz::Europe::Amsterdam);
        assert_eq!(windows.len(), 24);
        let (first_start, first_end) = windows.first().copied().expect("first window");
        assert_eq!((first_end - first_start).num_minutes(), 30);
        // 2025-03-03 is a Monday; 07:00 Amsterdam is 06:00 UTC in winter.
        assert_eq!(first_start.to_rfc3339(), "2025-03-03T06:00:00+00:00");
    }

    #[rstest]
    fn final_partial_window_is_dropped() {
        let schedule = SlotSchedule {
            slot_minutes: 45,
            ..SlotSchedule::default()
        };
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date");
        let windows = schedule.day_windows(day, chrono_tz::UTC);
        // A 12-hour window fits 16 whole 45-minute slots; the next slot would
        // start exactly at closing time and is not emitted.
        assert_eq!(windows.len(), 16);
    }

    #[rstest]
    #[case(Weekday::Mon, 2)]
    #[case(Weekday::Fri, 2)]
    #[case(Weekday::Sat, 1)]
    #[case(Weekday::Sun, 1)]
    fn weekend_days_halve_capacity(#[case] weekday: Weekday, #[case] expected: u32) {
        assert_eq!(SlotSchedule::default().capacity_for(weekday), expected);
    }

    #[rstest]
    fn spring_forward_day_keeps_its_wall_clock_window() {
        // Amsterdam skips 02:00-03:00 on 2025-03-30; the 07:00-19:00 local
        // window sits entirely after the transition, so the instant span is
        // unchanged and 24 slots are produced.
        let schedule = SlotSchedule::default();
        let day = NaiveDate::from_ymd_opt(2025, 3, 30).expect("valid date");
        let windows = schedule.day_windows(day, chrono_tz::Europe::Amsterdam);
        assert_eq!(windows.len(), 24);
        let (first_start, _) = windows.first().copied().expect("first window");
        // 07:00 Amsterdam is 05:00 UTC once summer time is in force.
        assert_eq!(first_start.to_rfc3339(), "2025-03-30T05:00:00+00:00");
    }
}
