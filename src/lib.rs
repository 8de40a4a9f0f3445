// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Metronome Firmware
//!
//! Tap-tempo metronome for an STM32F777 board with two push-buttons, four LEDs and a 16x2
//! HD44780 character display. Press button 2, then tap button 1: the interval between the two
//! presses becomes the tempo, shown as BPM and blinked on LED1 forever. Wait more than four
//! seconds and the board gives up with an error blink instead.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Compile-time timing, display and battery constants |
//! | [`timing`] | Tick counter, duration-based waits, periodic interrupt handlers |
//! | [`input`] | Button debounce filter and edge latch |
//! | [`drivers`] | Display, indicator LEDs, battery monitor |
//! | [`control`] | Tempo state machine, screens, application loop |
//! | [`hw`] | MCU-level wrappers for timers, GPIO, ADC, USART (feature `board`) |
//!
//! Everything except the board bindings is `no_std` and hardware-independent, and is tested on
//! the host.
//!
//! ## Getting Started
//!
//! Run the tests on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod drivers;
pub mod hw;
pub mod input;
pub mod timing;
