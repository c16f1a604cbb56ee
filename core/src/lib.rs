//! Platform-agnostic core logic for the nightwatch firmware
//!
//! This crate contains the monitoring logic shared across boards: civil
//! time handling, the window-gated polling state machine, and event
//! payload rendering. It has NO hardware dependencies, so everything
//! here is unit-tested on the host.

#![no_std]
#![deny(unsafe_code)]
#![deny(warnings)]

pub mod event;
pub mod monitor;
pub mod sensors;
pub mod time;
