// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic. None of them touch MCU registers; each takes its bus or pins by injection.
//!
//! ## Existing drivers
//!
//! - [`hd44780`] – HD44780-compatible 16x2 character display on an 8-bit parallel bus
//! - [`indicators`] – Four status LEDs behind the [`Signals`] hooks
//! - [`battery`] – Battery percentage from an ADC channel

pub mod battery;
pub mod hd44780;
pub mod indicators;

pub use battery::{AdcRead, Battery};
pub use hd44780::{DisplayBus, Hd44780, Register};
pub use indicators::{Indicators, Signal, Signals};
