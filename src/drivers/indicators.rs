// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Four-LED indicator bank.
//!
//! The tempo logic only knows the [`Signals`] hooks: light the beat, flash the armed LED, show the
//! error pattern. [`Indicators`] maps those onto four LEDs:
//!
//! | Signal | LEDs lit |
//! | ------ | -------- |
//! | `Clear` | none |
//! | `Beat` | LED1 |
//! | `Armed` | LED2 |
//! | `Error` | all four |

use embedded_hal::digital::OutputPin;

use crate::config::{ERROR_BLINK_COUNT, ERROR_BLINK_TICKS};
use crate::hw::Led;
use crate::timing::{wait_ticks, TickSource};

/// Output patterns driven by the tempo phases.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    Clear,
    Beat,
    Armed,
    Error,
}

/// Sink for indicator patterns.
pub trait Signals {
    type Error;

    /// Switch the outputs to `signal`, replacing whatever was shown before.
    fn show(&mut self, signal: Signal) -> Result<(), Self::Error>;
}

/// Blink the error pattern [`ERROR_BLINK_COUNT`] times, 200 ticks on and 200 ticks off.
///
/// Blocks for the whole cycle and re-baselines `timer` on every half period.
pub fn blink_error<S, T>(signals: &mut S, timer: &T) -> Result<(), S::Error>
where
    S: Signals,
    T: TickSource,
{
    for _ in 0..ERROR_BLINK_COUNT {
        signals.show(Signal::Error)?;
        wait_ticks(timer, ERROR_BLINK_TICKS);
        signals.show(Signal::Clear)?;
        wait_ticks(timer, ERROR_BLINK_TICKS);
    }
    Ok(())
}

/// Four LEDs that share one error type.
pub struct Indicators<L1, L2, L3, L4>
where
    L1: OutputPin,
    L2: OutputPin<Error = L1::Error>,
    L3: OutputPin<Error = L1::Error>,
    L4: OutputPin<Error = L1::Error>,
{
    led1: Led<L1>,
    led2: Led<L2>,
    led3: Led<L3>,
    led4: Led<L4>,
}

impl<L1, L2, L3, L4> Indicators<L1, L2, L3, L4>
where
    L1: OutputPin,
    L2: OutputPin<Error = L1::Error>,
    L3: OutputPin<Error = L1::Error>,
    L4: OutputPin<Error = L1::Error>,
{
    pub fn new(led1: Led<L1>, led2: Led<L2>, led3: Led<L3>, led4: Led<L4>) -> Self {
        Self {
            led1,
            led2,
            led3,
            led4,
        }
    }

    pub fn free(self) -> (Led<L1>, Led<L2>, Led<L3>, Led<L4>) {
        (self.led1, self.led2, self.led3, self.led4)
    }

    /// Drive each LED explicitly.
    pub fn set_all(&mut self, states: [bool; 4]) -> Result<(), L1::Error> {
        self.led1.set(states[0])?;
        self.led2.set(states[1])?;
        self.led3.set(states[2])?;
        self.led4.set(states[3])?;
        Ok(())
    }

    /// Current logical state of each LED.
    pub fn states(&self) -> [bool; 4] {
        [
            self.led1.is_on(),
            self.led2.is_on(),
            self.led3.is_on(),
            self.led4.is_on(),
        ]
    }
}

impl<L1, L2, L3, L4> Signals for Indicators<L1, L2, L3, L4>
where
    L1: OutputPin,
    L2: OutputPin<Error = L1::Error>,
    L3: OutputPin<Error = L1::Error>,
    L4: OutputPin<Error = L1::Error>,
{
    type Error = L1::Error;

    fn show(&mut self, signal: Signal) -> Result<(), Self::Error> {
        let states = match signal {
            Signal::Clear => [false; 4],
            Signal::Beat => [true, false, false, false],
            Signal::Armed => [false, true, false, false],
            Signal::Error => [true; 4],
        };
        self.set_all(states)
    }
}
