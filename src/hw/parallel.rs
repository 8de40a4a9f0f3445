// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bit-banged 8-bit parallel display bus on GPIOE.
//!
//! | Signal | Pin |
//! | ------ | --- |
//! | D0–D7 | PE0–PE7 |
//! | RS | PE8 |
//! | RW | PE9 |
//! | E | PE10 |
//!
//! Reads behave like a parallel master port: [`DisplayBus::read`] returns the byte latched by the
//! previous read cycle and then runs a new one. Every cycle completes before the call returns, so
//! the bus is never busy.

use core::convert::Infallible;

use stm32f7xx_hal::pac;

use crate::drivers::hd44780::{DisplayBus, Register};

const DATA_MASK: u32 = 0x00FF;
const RS: u32 = 1 << 8;
const RW: u32 = 1 << 9;
const E: u32 = 1 << 10;

/// MODER bits for PE0–PE7.
const DATA_MODER_MASK: u32 = 0x0000_FFFF;
/// General-purpose output (0b01) for PE0–PE7.
const DATA_MODER_OUTPUT: u32 = 0x0000_5555;
/// General-purpose output for PE8–PE10.
const CONTROL_MODER_OUTPUT: u32 = 0b01 << 16 | 0b01 << 18 | 0b01 << 20;
const CONTROL_MODER_MASK: u32 = 0b11 << 16 | 0b11 << 18 | 0b11 << 20;

/// Core clock cycles E is held high. About 1 µs at the 16 MHz reset clock, twice the controller's
/// minimum pulse width.
const ENABLE_PULSE_CYCLES: u32 = 16;

pub struct ParallelBus {
    port: pac::GPIOE,
    latch: u8,
}

impl ParallelBus {
    /// Take over PE0–PE10, drive the control lines low and leave the data lines as outputs.
    pub fn gpioe(port: pac::GPIOE) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.ahb1enr.modify(|_, w| w.gpioeen().set_bit());

        port.bsrr
            .write(|w| unsafe { w.bits((DATA_MASK | RS | RW | E) << 16) });
        port.moder.modify(|r, w| unsafe {
            w.bits(
                (r.bits() & !(DATA_MODER_MASK | CONTROL_MODER_MASK))
                    | DATA_MODER_OUTPUT
                    | CONTROL_MODER_OUTPUT,
            )
        });

        Self { port, latch: 0 }
    }

    pub fn free(self) -> pac::GPIOE {
        self.port
    }

    #[inline]
    fn set_reset(&mut self, set: u32, reset: u32) {
        self.port
            .bsrr
            .write(|w| unsafe { w.bits(set | (reset << 16)) });
    }

    fn data_as_output(&mut self, output: bool) {
        let mode = if output { DATA_MODER_OUTPUT } else { 0 };
        self.port
            .moder
            .modify(|r, w| unsafe { w.bits((r.bits() & !DATA_MODER_MASK) | mode) });
    }

    fn pulse_enable(&mut self) {
        self.set_reset(E, 0);
        cortex_m::asm::delay(ENABLE_PULSE_CYCLES);
    }

    fn release_enable(&mut self) {
        self.set_reset(0, E);
        cortex_m::asm::delay(ENABLE_PULSE_CYCLES);
    }
}

impl DisplayBus for ParallelBus {
    type Error = Infallible;

    #[inline]
    fn is_busy(&mut self) -> Result<bool, Infallible> {
        Ok(false)
    }

    fn select(&mut self, register: Register) -> Result<(), Infallible> {
        match register {
            Register::Command => self.set_reset(0, RS),
            Register::Data => self.set_reset(RS, 0),
        }
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), Infallible> {
        let byte = byte as u32;
        self.set_reset(0, RW);
        self.data_as_output(true);
        self.set_reset(byte, !byte & DATA_MASK);
        self.pulse_enable();
        self.release_enable();
        Ok(())
    }

    fn read(&mut self) -> Result<u8, Infallible> {
        let previous = self.latch;

        self.data_as_output(false);
        self.set_reset(RW, 0);
        self.pulse_enable();
        self.latch = (self.port.idr.read().bits() & DATA_MASK) as u8;
        self.release_enable();
        self.set_reset(0, RW);

        Ok(previous)
    }
}
