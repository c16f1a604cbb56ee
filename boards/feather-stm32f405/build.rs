//! Embeds the firmware build time for cold-RTC seeding.
//!
//! A battery-backed RTC reading earlier than the moment this binary was
//! compiled has necessarily lost power; the clock module reseeds it
//! from this value.

use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let build_unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs();
    println!("cargo:rustc-env=NIGHTWATCH_BUILD_UNIX_TIME={build_unix}");
    println!("cargo:rerun-if-changed=build.rs");
}
