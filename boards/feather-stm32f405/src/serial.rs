//! Event console on the serial link
//!
//! One payload per CRLF-terminated line at 115200 baud, consumed by
//! the gateway on the other end of the USB-serial cable. Writes are
//! fire-and-forget: a failed write is logged and the record dropped,
//! never retried.

#![deny(unsafe_code)]
#![deny(warnings)]

use defmt::warn;
use embassy_stm32::mode::Blocking;
use embassy_stm32::usart::UartTx;
use embedded_io::Write;

pub struct EventConsole {
    tx: UartTx<'static, Blocking>,
}

impl EventConsole {
    pub fn new(tx: UartTx<'static, Blocking>) -> Self {
        Self { tx }
    }

    /// Write one line to the console.
    pub fn write_line(&mut self, line: &str) {
        if self.tx.write_all(line.as_bytes()).is_err() || self.tx.write_all(b"\r\n").is_err() {
            warn!("serial write dropped");
        }
    }
}
