//! Hardware-free sensor conversion math
//!
//! The board crates own the actual drivers; this module holds the
//! arithmetic so it can be tested on the host.

/// Convert a raw ADC sample from the photoresistor divider into a
/// light level percentage.
///
/// The sample is scaled to the sensor's logic voltage range, then
/// compared against the empirically calibrated voltage of a lit room:
/// 100 % means "lights on, sensor not in shadow", 0 % means dark.
/// Deliberately unclamped; lighting brighter than the calibration
/// condition reads above 100 %.
pub fn light_level_percent(
    sample: u16,
    full_scale: u16,
    logic_volts: f32,
    lit_room_volts: f32,
) -> f32 {
    let sensor_volts = logic_volts * sample as f32 / full_scale as f32;
    100.0 * sensor_volts / lit_room_volts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_point_reads_full() {
        // 2.0 V lit-room calibration on a 4.0 V / 4000-count scale:
        // a 2000-count sample is exactly the calibration condition
        assert_eq!(light_level_percent(2000, 4000, 4.0, 2.0), 100.0);
    }

    #[test]
    fn dark_reads_zero() {
        assert_eq!(light_level_percent(0, 4000, 4.0, 2.0), 0.0);
    }

    #[test]
    fn brighter_than_calibration_is_not_clamped() {
        assert_eq!(light_level_percent(4000, 4000, 4.0, 2.0), 200.0);
    }

    #[test]
    fn scales_with_resolution() {
        // Same physical voltage on a 12-bit converter
        let p = light_level_percent(2048, 4096, 4.0, 2.0);
        assert_eq!(p, 100.0);
    }
}
