//! RTC (Real-Time Clock) wrapper and power-loss recovery
//!
//! Provides safe access to the STM32 hardware RTC. The RTC is the only
//! hardware singleton in the firmware, held behind a critical-section
//! mutex; all monitoring state lives in the monitor task itself.

#![deny(unsafe_code)]
#![deny(warnings)]

use core::cell::RefCell;
use critical_section::Mutex;
use defmt::{error, info, warn, Format};
use embassy_stm32::rtc::{DateTime as HalDateTime, DayOfWeek, Rtc};

use nightwatch_core::time::{datetime_to_unix, unix_to_datetime, DateTime};

/// Global internal RTC instance
static RTC: Mutex<RefCell<Option<Rtc>>> = Mutex::new(RefCell::new(None));

/// Unix time at which this firmware was built, embedded by `build.rs`.
pub fn build_unix_time() -> u64 {
    env!("NIGHTWATCH_BUILD_UNIX_TIME").parse().unwrap_or(0)
}

/// RTC operation errors
#[derive(Debug, Clone, Copy, Format)]
pub enum RtcError {
    /// RTC not initialized
    NotInitialized,
    /// RTC hardware error
    HardwareError,
}

impl core::fmt::Display for RtcError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "RTC not initialized"),
            Self::HardwareError => write!(f, "RTC hardware error"),
        }
    }
}

impl core::error::Error for RtcError {}

/// Initialize the internal RTC, reseeding it from the firmware build
/// timestamp if it lost power.
///
/// A battery-backed clock can never read earlier than its own
/// firmware's build instant, so such a reading (or an unreadable
/// clock) means the backup supply drained. The reseed is best-effort;
/// accuracy is then only as good as the last compile.
///
/// On error the caller reports the diagnostic and the system keeps
/// running with whatever the clock returns.
pub fn initialize_rtc(mut rtc: Rtc) -> Result<(), RtcError> {
    let lost_power = match rtc.now() {
        Ok(dt) => datetime_to_unix(&from_hal(&dt)) < build_unix_time(),
        Err(_) => true,
    };

    let result = if lost_power {
        warn!("RTC lost power, seeding from build timestamp");
        let seed = unix_to_datetime(build_unix_time());
        to_hal(&seed).and_then(|dt| {
            rtc.set_datetime(dt).map_err(|_| RtcError::HardwareError)
        })
    } else {
        Ok(())
    };

    critical_section::with(|cs| {
        RTC.borrow(cs).replace(Some(rtc));
    });
    info!("Internal RTC initialized");
    result
}

/// Read the current civil date-time from the RTC.
pub fn now() -> Result<DateTime, RtcError> {
    critical_section::with(|cs| {
        if let Some(rtc) = RTC.borrow(cs).borrow_mut().as_mut() {
            let dt = rtc.now().map_err(|_| RtcError::HardwareError)?;
            Ok(from_hal(&dt))
        } else {
            Err(RtcError::NotInitialized)
        }
    })
}

/// Read the clock, degrading to the Unix epoch on failure.
///
/// Logs errors but doesn't propagate them; a broken clock degrades the
/// timestamps, it never stops monitoring.
pub fn now_or_epoch() -> DateTime {
    match now() {
        Ok(dt) => dt,
        Err(e) => {
            error!("Failed to read RTC: {:?}", e);
            unix_to_datetime(0)
        }
    }
}

fn from_hal(dt: &HalDateTime) -> DateTime {
    DateTime::new(
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
    )
}

fn to_hal(dt: &DateTime) -> Result<HalDateTime, RtcError> {
    HalDateTime::from(
        dt.year,
        dt.month,
        dt.day,
        DayOfWeek::Monday, // not tracked; the hardware only needs a valid value
        dt.hour,
        dt.minute,
        dt.second,
        0,
    )
    .map_err(|_| RtcError::HardwareError)
}
