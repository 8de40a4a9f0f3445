// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single indicator LED on any `embedded-hal` output pin.

use embedded_hal::digital::OutputPin;

/// Whether the LED is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

/// LED that remembers its wiring polarity and last commanded state.
pub struct Led<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
    is_on: bool,
}

impl<PIN: OutputPin> Led<PIN> {
    /// Wrap `pin` and drive it to the OFF level.
    pub fn new(pin: PIN, active: ActiveLevel) -> Result<Self, PIN::Error> {
        let mut led = Self {
            pin,
            active,
            is_on: true,
        };
        led.set(false)?;
        Ok(led)
    }

    pub fn active_high(pin: PIN) -> Result<Self, PIN::Error> {
        Self::new(pin, ActiveLevel::High)
    }

    pub fn active_low(pin: PIN) -> Result<Self, PIN::Error> {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Drive the LED logically ON (true) or OFF (false).
    pub fn set(&mut self, on: bool) -> Result<(), PIN::Error> {
        let high = match self.active {
            ActiveLevel::High => on,
            ActiveLevel::Low => !on,
        };
        if high {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.is_on = on;
        Ok(())
    }

    #[inline]
    pub fn on(&mut self) -> Result<(), PIN::Error> {
        self.set(true)
    }

    #[inline]
    pub fn off(&mut self) -> Result<(), PIN::Error> {
        self.set(false)
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}
