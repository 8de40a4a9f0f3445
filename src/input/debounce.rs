// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Consecutive-agreement button debounce filter.
//!
//! Each channel is sampled once per [`DEBOUNCE_PERIOD_US`]. A sample that differs from the
//! previous one resets the agreement count; once [`DEBOUNCE_THRESHOLD`] consecutive samples have
//! agreed, the stable state commits to the current level and the count starts over. At 100 µs that
//! is roughly 1 ms of stable contact before a transition is accepted.
//!
//! The filter is run-length gated, not a majority vote: a single disagreeing sample anywhere in
//! the run throws the run away.

use core::cell::RefCell;

use critical_section::Mutex;
use embedded_hal::digital::InputPin;

use crate::config::{DEBOUNCE_PERIOD_US, DEBOUNCE_THRESHOLD};
use crate::timing::PeriodicHandler;

/// Logical button level.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    Released,
    Pressed,
}

impl ButtonState {
    /// Map an active-high pin level to a button state.
    #[inline]
    pub fn from_level(high: bool) -> Self {
        if high {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }

    #[inline]
    pub fn is_pressed(self) -> bool {
        self == ButtonState::Pressed
    }
}

/// Debounce state of one physical button.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonChannel {
    /// Level read on the latest sample
    current: ButtonState,
    /// Level read on the sample before that
    previous: ButtonState,
    /// Debounced state seen by the rest of the firmware
    stable: ButtonState,
    /// Consecutive samples equal to their predecessor
    agreement: u8,
}

impl ButtonChannel {
    pub const fn new() -> Self {
        Self {
            current: ButtonState::Released,
            previous: ButtonState::Released,
            stable: ButtonState::Released,
            agreement: 0,
        }
    }

    /// Feed one raw sample through the filter.
    pub fn sample(&mut self, raw: ButtonState) {
        self.current = raw;

        self.agreement = if self.current == self.previous {
            self.agreement.saturating_add(1)
        } else {
            0
        };

        self.previous = self.current;

        if self.agreement >= DEBOUNCE_THRESHOLD {
            self.stable = self.current;
            self.agreement = 0;
        }
    }

    #[inline]
    pub fn state(&self) -> ButtonState {
        self.stable
    }

    #[inline]
    pub fn raw(&self) -> ButtonState {
        self.current
    }

    #[inline]
    pub fn agreement(&self) -> u8 {
        self.agreement
    }
}

impl Default for ButtonChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies one of the two buttons.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Tap button.
    One,
    /// Start button.
    Two,
}

/// Which buttons are pressed in a snapshot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pressed {
    None,
    One,
    Two,
    Both,
}

/// Debounced states of both buttons, read together.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSnapshot {
    pub one: ButtonState,
    pub two: ButtonState,
}

impl ButtonSnapshot {
    pub const RELEASED: Self = Self {
        one: ButtonState::Released,
        two: ButtonState::Released,
    };

    pub fn new(one: ButtonState, two: ButtonState) -> Self {
        Self { one, two }
    }

    #[inline]
    pub fn state(&self, button: Button) -> ButtonState {
        match button {
            Button::One => self.one,
            Button::Two => self.two,
        }
    }

    pub fn pressed(&self) -> Pressed {
        match (self.one.is_pressed(), self.two.is_pressed()) {
            (false, false) => Pressed::None,
            (true, false) => Pressed::One,
            (false, true) => Pressed::Two,
            (true, true) => Pressed::Both,
        }
    }
}

/// Both button channels, shared between the sampling interrupt and the main flow.
///
/// The interrupt is the only writer. Readers go through [`SharedButtons::snapshot`], which reads
/// both channels inside one critical section so a sample cannot land between them.
pub struct SharedButtons {
    channels: Mutex<RefCell<[ButtonChannel; 2]>>,
}

impl SharedButtons {
    pub const fn new() -> Self {
        Self {
            channels: Mutex::new(RefCell::new([ButtonChannel::new(), ButtonChannel::new()])),
        }
    }

    /// Run one filter step on both channels. Called from the sampling interrupt.
    pub fn sample(&self, one: ButtonState, two: ButtonState) {
        critical_section::with(|cs| {
            let mut channels = self.channels.borrow_ref_mut(cs);
            channels[0].sample(one);
            channels[1].sample(two);
        });
    }

    /// Consistent view of both debounced states.
    pub fn snapshot(&self) -> ButtonSnapshot {
        critical_section::with(|cs| {
            let channels = self.channels.borrow_ref(cs);
            ButtonSnapshot {
                one: channels[0].state(),
                two: channels[1].state(),
            }
        })
    }

    /// Copy of a single channel's filter state.
    pub fn channel(&self, button: Button) -> ButtonChannel {
        critical_section::with(|cs| {
            let channels = self.channels.borrow_ref(cs);
            match button {
                Button::One => channels[0],
                Button::Two => channels[1],
            }
        })
    }
}

impl Default for SharedButtons {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the two button pins and feeds [`SharedButtons`]. Registered on the 100 µs timer.
///
/// Pins are active-high: a high level reads as [`ButtonState::Pressed`].
pub struct ButtonSampler<'a, P1, P2>
where
    P1: InputPin,
    P2: InputPin,
{
    one: P1,
    two: P2,
    buttons: &'a SharedButtons,
}

impl<'a, P1, P2> ButtonSampler<'a, P1, P2>
where
    P1: InputPin,
    P2: InputPin,
{
    pub fn new(one: P1, two: P2, buttons: &'a SharedButtons) -> Self {
        Self { one, two, buttons }
    }

    pub fn free(self) -> (P1, P2) {
        (self.one, self.two)
    }

    /// Sample both pins once. A failed pin read counts as released.
    pub fn sample(&mut self) {
        let one = ButtonState::from_level(self.one.is_high().unwrap_or(false));
        let two = ButtonState::from_level(self.two.is_high().unwrap_or(false));
        self.buttons.sample(one, two);
    }
}

impl<P1, P2> PeriodicHandler for ButtonSampler<'_, P1, P2>
where
    P1: InputPin,
    P2: InputPin,
{
    const PERIOD_US: u32 = DEBOUNCE_PERIOD_US;

    #[inline]
    fn on_period(&mut self) {
        self.sample();
    }
}
