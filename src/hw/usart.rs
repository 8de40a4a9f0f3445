// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART debug console.
//!
//! Output-only: boot progress and tempo events are printed for whoever is attached to the debug
//! terminal. Nothing is ever read back.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

use crate::control::TempoEvent;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    pub fn print_u32(&mut self, n: u32) {
        let mut buf = itoa::Buffer::new();
        self.write_str(buf.format(n));
    }

    /// One console line per tempo transition.
    pub fn log_event(&mut self, event: TempoEvent) {
        match event {
            TempoEvent::Armed => self.println("tempo: armed"),
            TempoEvent::ArmFlashEnd => {}
            TempoEvent::Captured { interval, bpm } => {
                self.write_str("tempo: interval = ");
                self.print_u32(interval);
                self.write_str(" ms, bpm = ");
                self.print_u32(bpm);
                self.write_str("\r\n");
            }
            TempoEvent::Expired => self.println("tempo: capture window expired"),
            // One line per beat would flood the console.
            TempoEvent::BeatOn | TempoEvent::BeatOff => {}
        }
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}
