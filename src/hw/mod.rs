// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Layer
//!
//! [`led`] only needs `embedded-hal` and builds everywhere. The rest binds to the STM32F777 and
//! is only compiled with the `board` feature.

pub mod led;

#[cfg(feature = "board")]
pub mod adc;
#[cfg(feature = "board")]
pub mod gpio;
#[cfg(feature = "board")]
pub mod parallel;
#[cfg(feature = "board")]
pub mod pins;
#[cfg(feature = "board")]
pub mod timer;
#[cfg(feature = "board")]
pub mod usart;

pub use led::Led;

#[cfg(feature = "board")]
pub use adc::Adc;
#[cfg(feature = "board")]
pub use gpio::{BoardInput, BoardOutput};
#[cfg(feature = "board")]
pub use parallel::ParallelBus;
#[cfg(feature = "board")]
pub use pins::BoardPins;
#[cfg(feature = "board")]
pub use timer::{FreeRunningTimer, PeriodicTimer};
#[cfg(feature = "board")]
pub use usart::Usart;
