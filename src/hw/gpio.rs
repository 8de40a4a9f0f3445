// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `embedded-hal` 1.0 digital pins over the STM32F7 HAL's GPIO types.
//!
//! The drivers in this crate take `embedded_hal::digital` pins. These wrappers forward to the
//! HAL's inherent pin methods, which cannot fail.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use stm32f7xx_hal::gpio::{self, Input, Output, PinState, PullDown, PushPull};

/// Push-pull output, generic over any GPIO pin.
pub struct BoardOutput<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> BoardOutput<P, N> {
    /// Reconfigure `pin` as a push-pull output, starting low.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_state(PinState::Low);
        Self { pin }
    }

    pub fn free(self) -> gpio::Pin<P, N, Output<PushPull>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for BoardOutput<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for BoardOutput<P, N> {
    #[inline]
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.pin.set_high();
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.pin.set_low();
        Ok(())
    }
}

/// Input with the internal pull-down enabled; reads high while the button is held.
pub struct BoardInput<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Input<PullDown>>,
}

impl<const P: char, const N: u8> BoardInput<P, N> {
    pub fn pull_down<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        Self {
            pin: pin.into_pull_down_input(),
        }
    }

    pub fn free(self) -> gpio::Pin<P, N, Input<PullDown>> {
        self.pin
    }
}

impl<const P: char, const N: u8> ErrorType for BoardInput<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> InputPin for BoardInput<P, N> {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_high())
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.pin.is_low())
    }
}
