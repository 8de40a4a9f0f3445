// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Timing
//!
//! - [`ticks`] - Tick counters, the `TickSource` abstraction and duration-based waits.
//! - [`periodic`] - Contract for work performed from fixed-period timer interrupts.

pub mod periodic;
pub mod ticks;

pub use periodic::PeriodicHandler;
pub use ticks::{ticks_for_us, wait_ticks, wait_us, TickCounter, TickSource};
