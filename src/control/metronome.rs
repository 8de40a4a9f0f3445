// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tap-tempo application loop.
//!
//! [`Metronome`] wires the [`TempoStateMachine`] to its outputs: each [`TempoEvent`] becomes a
//! screen on the display or a pattern on the indicators. The machine itself never touches either.
//!
//! Typical usage pattern:
//!
//! ```no_run
//! let mut metronome = Metronome::new(lcd, indicators, &TICKS);
//! metronome.run(&BUTTONS)?;
//! ```

use core::convert::Infallible;

use crate::control::screens;
use crate::control::tempo::{TempoEvent, TempoStateMachine};
use crate::drivers::indicators::blink_error;
use crate::drivers::{DisplayBus, Hd44780, Signal, Signals};
use crate::input::{ButtonSnapshot, SharedButtons};
use crate::timing::TickSource;

/// Failure on one of the two outputs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<D, S> {
    Display(D),
    Signals(S),
}

pub type MetronomeError<B, S> = Error<<B as DisplayBus>::Error, <S as Signals>::Error>;

pub struct Metronome<B: DisplayBus, S: Signals, T: TickSource> {
    lcd: Hd44780<B>,
    signals: S,
    ticks: T,
    tempo: TempoStateMachine,
}

impl<B: DisplayBus, S: Signals, T: TickSource> Metronome<B, S, T> {
    /// `ticks` must be the counter advanced by the tick interrupt.
    pub fn new(lcd: Hd44780<B>, signals: S, ticks: T) -> Self {
        Self::with_tempo(lcd, signals, ticks, TempoStateMachine::new())
    }

    pub fn with_tempo(lcd: Hd44780<B>, signals: S, ticks: T, tempo: TempoStateMachine) -> Self {
        Self {
            lcd,
            signals,
            ticks,
            tempo,
        }
    }

    pub fn free(self) -> (Hd44780<B>, S, T) {
        (self.lcd, self.signals, self.ticks)
    }

    #[inline]
    pub fn tempo(&self) -> &TempoStateMachine {
        &self.tempo
    }

    #[inline]
    pub fn display(&mut self) -> &mut Hd44780<B> {
        &mut self.lcd
    }

    #[inline]
    pub fn signals(&self) -> &S {
        &self.signals
    }

    /// Show the prompt and start waiting for the start button.
    pub fn begin(&mut self) -> Result<(), MetronomeError<B, S>> {
        screens::prompt(&mut self.lcd).map_err(Error::Display)?;
        self.tempo.start();
        Ok(())
    }

    /// Poll the tempo machine once and apply whatever it reports.
    pub fn step(
        &mut self,
        buttons: ButtonSnapshot,
    ) -> Result<Option<TempoEvent>, MetronomeError<B, S>> {
        let event = self.tempo.poll(buttons, &self.ticks);

        match event {
            None => {}
            Some(TempoEvent::Armed) => self.show(Signal::Armed)?,
            Some(TempoEvent::ArmFlashEnd) => self.show(Signal::Clear)?,
            Some(TempoEvent::Captured { bpm, .. }) => {
                screens::bpm(&mut self.lcd, bpm).map_err(Error::Display)?
            }
            Some(TempoEvent::Expired) => {
                self.show(Signal::Clear)?;
                screens::out_of_time(&mut self.lcd).map_err(Error::Display)?
            }
            Some(TempoEvent::BeatOn) => self.show(Signal::Beat)?,
            Some(TempoEvent::BeatOff) => self.show(Signal::Clear)?,
        }

        Ok(event)
    }

    /// Run the session forever. Never returns except on an output error.
    pub fn run(&mut self, buttons: &SharedButtons) -> Result<Infallible, MetronomeError<B, S>> {
        self.run_with(buttons, |_| {})
    }

    /// Like [`Metronome::run`], passing every event to `on_event` after it has been applied.
    pub fn run_with<F>(
        &mut self,
        buttons: &SharedButtons,
        mut on_event: F,
    ) -> Result<Infallible, MetronomeError<B, S>>
    where
        F: FnMut(TempoEvent),
    {
        self.begin()?;

        while !self.tempo.is_expired() {
            if let Some(event) = self.step(buttons.snapshot())? {
                on_event(event);
            }
        }

        loop {
            blink_error(&mut self.signals, &self.ticks).map_err(Error::Signals)?;
        }
    }

    fn show(&mut self, signal: Signal) -> Result<(), MetronomeError<B, S>> {
        self.signals.show(signal).map_err(Error::Signals)
    }
}
