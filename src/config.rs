// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration for the metronome firmware.
//!
//! Timing constants are expressed in ticks of the source that consumes them. The tempo path runs
//! on the 1 ms [`TickCounter`](crate::timing::TickCounter), so tick counts there read as
//! milliseconds.

// ----- Button sampling -----

/// Period of the button sampling interrupt.
pub const DEBOUNCE_PERIOD_US: u32 = 100;

/// Consecutive agreeing samples required before a button's stable state commits.
pub const DEBOUNCE_THRESHOLD: u8 = 10;

// ----- Tick counter -----

/// Period of the tick counter interrupt.
pub const TICK_PERIOD_US: u32 = 1_000;

/// Tick length of the free-running timer used for display settle waits.
pub const DISPLAY_TICK_NS: u32 = 6_000;

// ----- Tempo capture and playback -----

/// Capture window after arming, in ticks.
pub const CAPTURE_TIMEOUT_TICKS: u32 = 4_000;

/// How long the beat indicator stays lit, in ticks.
pub const BEAT_ON_TICKS: u32 = 5;

/// How long the armed indicator flashes after the start button, in ticks.
pub const ARM_FLASH_TICKS: u32 = 10;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u32 = 60_000;

/// Empirical correction applied to the BPM readout, in percent (0.79).
pub const TEMPO_CORRECTION_PERCENT: u32 = 79;

/// `60000 * 0.79`, the numerator of the BPM computation.
pub const BPM_NUMERATOR: u32 = MS_PER_MINUTE / 100 * TEMPO_CORRECTION_PERCENT;

// ----- Error signal -----

/// On/off blinks per error-signal cycle.
pub const ERROR_BLINK_COUNT: u8 = 4;

/// Half-period of an error blink, in ticks.
pub const ERROR_BLINK_TICKS: u32 = 200;

// ----- Display geometry -----

/// Visible characters per line.
pub const DISPLAY_WIDTH: u8 = 16;

/// Number of display lines.
pub const DISPLAY_LINES: u8 = 2;

// ----- Battery -----

/// ADC channel wired to the battery divider.
pub const BATTERY_CHANNEL: u8 = 3;

/// Divider applied to the raw 10-bit conversion.
pub const BATTERY_SCALE_DIV: u16 = 4;

/// Offset subtracted after scaling.
pub const BATTERY_OFFSET: u16 = 6;

/// How long the boot splash stays up, in ticks.
pub const SPLASH_TICKS: u32 = 1_500;

/// Delay between loading-bar steps, in ticks.
pub const LOADING_STEP_TICKS: u32 = 10;
