//! Clock access backed by the hardware RTC
//!
//! The STM32 internal RTC runs from the LSE crystal and keeps counting
//! through resets on VBAT. On boot the clock is sanity-checked against
//! the firmware build timestamp and reseeded from it after a power
//! loss. Event timestamps are read from here once per loop iteration.

#![deny(unsafe_code)]
#![deny(warnings)]

mod rtc;

pub use rtc::{build_unix_time, initialize_rtc, now_or_epoch, RtcError};
