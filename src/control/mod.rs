// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Application Control
//!
//! This module holds the tap-tempo logic and the glue that drives the display and indicators
//! from it.
//!
//! ## Modules
//!
//! - [`tempo`] - Tap-tempo capture and playback state machine.
//! - [`metronome`] - Main application loop around the state machine.
//! - [`screens`] - Fixed texts and formatted readouts for the display.

pub mod metronome;
pub mod screens;
pub mod tempo;

pub use metronome::{Error, Metronome};
pub use tempo::{Phase, TempoEvent, TempoStateMachine, TempoTiming};
