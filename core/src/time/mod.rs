//! Civil time types and timestamp rendering
//!
//! The monitoring loop works entirely in civil (calendar) time read
//! from a battery-backed RTC. This module provides the civil types,
//! the Unix conversions used to seed a cold RTC, and the fixed-format
//! event timestamp.

mod calendar;

pub use calendar::{datetime_to_unix, unix_to_datetime};

use core::fmt::Write;
use heapless::String;

/// Length of a rendered timestamp.
/// Format: "YYYY-MM-DD HH:MM:SS" = 10 + 1 + 8 = 19 bytes.
pub const TIMESTAMP_LEN: usize = 19;

/// A rendered `"YYYY-MM-DD HH:MM:SS"` timestamp.
pub type TimestampString = String<TIMESTAMP_LEN>;

/// Civil date-time with 1-second resolution, as read from the RTC.
///
/// UTC-naive: the device reports whatever wall time the clock was
/// seeded with. Valid for years 1970-9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Create a date-time. Fields are not range-checked; the RTC and
    /// the calendar conversions only produce valid values.
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// The time-of-day component, used for window boundary compares.
    pub const fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::new(self.hour, self.minute, self.second)
    }

    /// Render the event timestamp, e.g. `"2023-10-23 19:30:00"`.
    pub fn timestamp(&self) -> TimestampString {
        let mut out = TimestampString::new();
        // 4+1+2+1+2 (date) + 1 + 2+1+2+1+2 (time) = 19 bytes, which is
        // exactly TIMESTAMP_LEN for any four-digit year.
        write!(
            &mut out,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
        .expect("timestamp should fit");
        out
    }
}

/// A wall-clock time of day with 1-second resolution.
///
/// Monitoring window boundaries are `TimeOfDay` values and are matched
/// by exact equality: the gate toggles only during the literal boundary
/// second, never by range containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_zero_padded() {
        let dt = DateTime::new(2024, 3, 7, 6, 5, 9);
        assert_eq!(dt.timestamp().as_str(), "2024-03-07 06:05:09");
    }

    #[test]
    fn timestamp_fills_exact_capacity() {
        let dt = DateTime::new(2023, 10, 23, 19, 30, 0);
        let ts = dt.timestamp();
        assert_eq!(ts.len(), TIMESTAMP_LEN);
        assert_eq!(ts.as_str(), "2023-10-23 19:30:00");
    }

    #[test]
    fn time_of_day_equality_is_exact() {
        let boundary = TimeOfDay::new(18, 0, 0);
        assert_eq!(DateTime::new(2024, 1, 1, 18, 0, 0).time_of_day(), boundary);
        assert_ne!(DateTime::new(2024, 1, 1, 18, 0, 1).time_of_day(), boundary);
        assert_ne!(DateTime::new(2024, 1, 1, 17, 59, 59).time_of_day(), boundary);
    }
}
