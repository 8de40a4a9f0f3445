// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Button Input
//!
//! - [`debounce`] - Interrupt-driven consecutive-agreement filter for the two buttons.
//! - [`latch`] - Fire-once rising-edge latch used by the tempo state machine.

pub mod debounce;
pub mod latch;

pub use debounce::{
    Button, ButtonChannel, ButtonSampler, ButtonSnapshot, ButtonState, Pressed, SharedButtons,
};
pub use latch::EdgeLatch;
