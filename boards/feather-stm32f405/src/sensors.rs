//! Photoresistor light sensor on the A0 analog input
//!
//! The photoresistor sits in a divider against the 3.3 V rail and is
//! sampled one-shot through ADC1. The raw count is converted to a
//! light level percentage against the calibrated lit-room voltage in
//! `nightwatch_core::sensors`; the temperature sensor lives on the I2C
//! bus and is driven directly by the monitor task.

#![deny(unsafe_code)]
#![deny(warnings)]

use embassy_stm32::adc::Adc;
use embassy_stm32::peripherals::{ADC1, PA4};
use embassy_stm32::Peri;

use nightwatch_core::sensors::light_level_percent;

use crate::config;

pub struct LightSensor {
    adc: Adc<'static, ADC1>,
    pin: Peri<'static, PA4>,
}

impl LightSensor {
    pub fn new(adc: Peri<'static, ADC1>, pin: Peri<'static, PA4>) -> Self {
        Self {
            adc: Adc::new(adc),
            pin,
        }
    }

    /// One-shot reading converted to a light level percentage.
    ///
    /// Unclamped: direct light on the sensor reads above 100 %.
    pub fn read_percent(&mut self) -> f32 {
        let sample = self.adc.blocking_read(&mut self.pin);
        light_level_percent(
            sample,
            config::ADC_FULL_SCALE,
            config::ADC_LOGIC_VOLTS,
            config::LIT_ROOM_SENSOR_VOLTS,
        )
    }
}
