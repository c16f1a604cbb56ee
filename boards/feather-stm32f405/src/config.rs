//! Board-level deployment configuration
//!
//! Everything here is compile-time; the monitoring parameters
//! themselves (window, threshold, intervals) are the
//! `MonitorConfig::default()` values in `nightwatch_core`.

#![deny(unsafe_code)]
#![deny(warnings)]

/// Monitor task cadence. Far below the 1 s window-boundary
/// granularity, so the exact-second boundary compare cannot be
/// skipped between iterations.
pub const MONITOR_TICK_MS: u64 = 10;

/// 12-bit ADC full scale.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Photoresistor divider logic voltage.
pub const ADC_LOGIC_VOLTS: f32 = 3.3;

/// Divider voltage measured in a lit room (empirical calibration).
pub const LIT_ROOM_SENSOR_VOLTS: f32 = 2.9;

/// Event console baud rate.
pub const SERIAL_BAUD: u32 = 115_200;
