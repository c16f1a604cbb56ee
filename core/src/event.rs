//! Emitted event records and their serial payloads
//!
//! Each record renders to a single JSON object, one per console line.
//! The shapes are fixed, the gateway on the other end of the serial
//! link parses them field-for-field:
//!
//! - `{"lights":<0|1>,"time":"YYYY-MM-DD HH:MM:SS"}`
//! - `{"temp":<two decimals>,"time":"YYYY-MM-DD HH:MM:SS"}`

use core::fmt::{self, Write};

use heapless::String;

use crate::time::TimestampString;

/// Maximum length of a rendered payload.
/// `{"lights":1,"time":"yyyy-mm-dd hh:mm:ss"}` is 41 bytes;
/// `{"temp":-999.99,"time":"yyyy-mm-dd hh:mm:ss"}` is 45 bytes.
/// Rounded up for headroom on pathological sensor values.
pub const EVENT_JSON_MAX_LEN: usize = 48;

/// A single emitted event. Not retained after being written out.
#[derive(Debug, Clone, PartialEq)]
pub enum EventRecord {
    /// Light state transition; `on` renders as `1`/`0`.
    Lights { on: bool, time: TimestampString },
    /// Periodic ambient temperature sample, in degrees Celsius.
    Temperature { celsius: f32, time: TimestampString },
}

impl EventRecord {
    /// Render the JSON payload.
    ///
    /// Errors only if a value overflows the payload capacity, which no
    /// in-range sensor reading does; the caller logs and drops the
    /// record in that case.
    pub fn json(&self) -> Result<String<EVENT_JSON_MAX_LEN>, fmt::Error> {
        let mut payload = String::new();
        match self {
            Self::Lights { on, time } => write!(
                &mut payload,
                "{{\"lights\":{},\"time\":\"{}\"}}",
                u8::from(*on),
                time
            )?,
            Self::Temperature { celsius, time } => write!(
                &mut payload,
                "{{\"temp\":{:.2},\"time\":\"{}\"}}",
                celsius, time
            )?,
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DateTime;

    fn ts() -> TimestampString {
        DateTime::new(2023, 10, 23, 19, 30, 0).timestamp()
    }

    #[test]
    fn temperature_payload_is_byte_exact() {
        let ev = EventRecord::Temperature {
            celsius: 20.13,
            time: ts(),
        };
        assert_eq!(
            ev.json().unwrap().as_str(),
            "{\"temp\":20.13,\"time\":\"2023-10-23 19:30:00\"}"
        );
    }

    #[test]
    fn temperature_always_renders_two_decimals() {
        let ev = EventRecord::Temperature {
            celsius: 21.0,
            time: ts(),
        };
        assert_eq!(
            ev.json().unwrap().as_str(),
            "{\"temp\":21.00,\"time\":\"2023-10-23 19:30:00\"}"
        );

        let ev = EventRecord::Temperature {
            celsius: -0.5,
            time: ts(),
        };
        assert_eq!(
            ev.json().unwrap().as_str(),
            "{\"temp\":-0.50,\"time\":\"2023-10-23 19:30:00\"}"
        );
    }

    #[test]
    fn lights_payloads_are_byte_exact() {
        let on = EventRecord::Lights {
            on: true,
            time: ts(),
        };
        assert_eq!(
            on.json().unwrap().as_str(),
            "{\"lights\":1,\"time\":\"2023-10-23 19:30:00\"}"
        );

        let off = EventRecord::Lights {
            on: false,
            time: ts(),
        };
        assert_eq!(
            off.json().unwrap().as_str(),
            "{\"lights\":0,\"time\":\"2023-10-23 19:30:00\"}"
        );
    }
}
