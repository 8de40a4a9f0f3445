// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tap-tempo capture and playback.
//!
//! The session runs once per power cycle:
//!
//! ```text
//! Idle ─start()─▶ ArmedWaitingStart ─btn2─▶ Capturing ─btn1─▶ Captured ──▶ Playing (forever)
//!                                               │
//!                                               └─ timeout or zero interval ─▶ Expired
//! ```
//!
//! The machine never blocks. Each [`TempoStateMachine::poll`] looks at one debounced button
//! snapshot and the tick counter, advances at most one transition and reports it as a
//! [`TempoEvent`]. Playback is paced the same way: every beat edge re-baselines the counter and
//! the next edge fires once the count reaches its target.
//!
//! While capturing, the timeout is checked before the tap button. Only "button 2 alone" arms and
//! only "button 1 alone" taps; both pressed together counts as neither.

use crate::config::{ARM_FLASH_TICKS, BEAT_ON_TICKS, BPM_NUMERATOR, CAPTURE_TIMEOUT_TICKS};
use crate::input::{ButtonSnapshot, EdgeLatch, Pressed};
use crate::timing::TickSource;

/// Beats per minute shown for a captured interval, or `None` for a zero interval.
///
/// Integer form of `60000 * 0.79 / interval`, truncated.
#[inline]
pub fn bpm(interval: u32) -> Option<u32> {
    BPM_NUMERATOR.checked_div(interval)
}

/// Tick budgets for the session, in ticks of the tempo counter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TempoTiming {
    /// Capture window measured from the start press.
    pub capture_timeout: u32,
    /// Armed indicator flash after the start press. Taps are ignored until it ends.
    pub arm_flash: u32,
    /// Beat indicator on-time.
    pub beat_on: u32,
}

impl Default for TempoTiming {
    fn default() -> Self {
        Self {
            capture_timeout: CAPTURE_TIMEOUT_TICKS,
            arm_flash: ARM_FLASH_TICKS,
            beat_on: BEAT_ON_TICKS,
        }
    }
}

/// Half of a playback cycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Beat {
    /// Beat indicator off, waiting out the interval.
    Waiting,
    /// Beat indicator lit.
    On,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    ArmedWaitingStart,
    Capturing { flashing: bool },
    Captured,
    Expired,
    Playing(Beat),
}

/// Transition reported by [`TempoStateMachine::poll`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TempoEvent {
    /// Start button seen; the counter was reset.
    Armed,
    /// Armed indicator flash is over.
    ArmFlashEnd,
    /// Tap seen inside the window.
    Captured { interval: u32, bpm: u32 },
    /// Capture window ran out, or the tap landed on tick 0.
    Expired,
    BeatOn,
    BeatOff,
}

pub struct TempoStateMachine {
    phase: Phase,
    timing: TempoTiming,
    start_latch: EdgeLatch,
    tap_latch: EdgeLatch,
    interval: u32,
    bpm: u32,
}

impl TempoStateMachine {
    pub fn new() -> Self {
        Self::with_timing(TempoTiming::default())
    }

    pub fn with_timing(timing: TempoTiming) -> Self {
        Self {
            phase: Phase::Idle,
            timing,
            start_latch: EdgeLatch::new(),
            tap_latch: EdgeLatch::new(),
            interval: 0,
            bpm: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn timing(&self) -> TempoTiming {
        self.timing
    }

    /// Captured interval in ticks, once a tap has been accepted.
    pub fn interval(&self) -> Option<u32> {
        match self.phase {
            Phase::Captured | Phase::Playing(_) => Some(self.interval),
            _ => None,
        }
    }

    pub fn bpm(&self) -> Option<u32> {
        self.interval().map(|_| self.bpm)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.phase == Phase::Expired
    }

    /// Leave `Idle` and wait for the start button. No effect in any other phase.
    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::ArmedWaitingStart;
        }
    }

    /// Advance the session by at most one transition.
    pub fn poll<T: TickSource>(
        &mut self,
        buttons: ButtonSnapshot,
        ticks: &T,
    ) -> Option<TempoEvent> {
        let event = match self.phase {
            Phase::Idle | Phase::Expired => None,

            Phase::ArmedWaitingStart => {
                if self.start_latch.rising(buttons.pressed() == Pressed::Two) {
                    ticks.restart();
                    self.phase = Phase::Capturing { flashing: true };
                    Some(TempoEvent::Armed)
                } else {
                    None
                }
            }

            Phase::Capturing { flashing } => self.poll_capture(buttons, ticks.ticks(), flashing),

            Phase::Captured => {
                ticks.restart();
                self.phase = Phase::Playing(Beat::Waiting);
                None
            }

            Phase::Playing(Beat::Waiting) => {
                if ticks.ticks() >= self.interval {
                    ticks.restart();
                    self.phase = Phase::Playing(Beat::On);
                    Some(TempoEvent::BeatOn)
                } else {
                    None
                }
            }

            Phase::Playing(Beat::On) => {
                if ticks.ticks() >= self.timing.beat_on {
                    ticks.restart();
                    self.phase = Phase::Playing(Beat::Waiting);
                    Some(TempoEvent::BeatOff)
                } else {
                    None
                }
            }
        };

        #[cfg(feature = "defmt")]
        {
            if let Some(e) = event {
                defmt::debug!("tempo: {} -> {}", e, self.phase);
            }
        }

        event
    }

    fn poll_capture(
        &mut self,
        buttons: ButtonSnapshot,
        now: u32,
        flashing: bool,
    ) -> Option<TempoEvent> {
        if now >= self.timing.capture_timeout {
            self.phase = Phase::Expired;
            return Some(TempoEvent::Expired);
        }

        if flashing {
            if now >= self.timing.arm_flash {
                self.phase = Phase::Capturing { flashing: false };
                return Some(TempoEvent::ArmFlashEnd);
            }
            return None;
        }

        if !self.tap_latch.rising(buttons.pressed() == Pressed::One) {
            return None;
        }

        match bpm(now) {
            Some(bpm) => {
                self.interval = now;
                self.bpm = bpm;
                self.phase = Phase::Captured;
                Some(TempoEvent::Captured { interval: now, bpm })
            }
            None => {
                self.phase = Phase::Expired;
                Some(TempoEvent::Expired)
            }
        }
    }
}

impl Default for TempoStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
