// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Battery level from the divider on the battery sense channel.
//!
//! The divider is read as a 10-bit conversion and mapped to a rough percentage with
//! `raw / 4 - 6`. The mapping is linear and uncalibrated, so the result is clamped to `0..=100`.

use crate::config::{BATTERY_CHANNEL, BATTERY_OFFSET, BATTERY_SCALE_DIV};

/// Trait for reading a single channel from an ADC peripheral.
pub trait AdcRead {
    fn read_channel(&mut self, ch: u8) -> u16;
}

/// Convert a raw 10-bit conversion to a battery percentage.
pub fn percent_from_raw(raw: u16) -> u8 {
    let scaled = (raw / BATTERY_SCALE_DIV).saturating_sub(BATTERY_OFFSET);
    scaled.min(100) as u8
}

/// Battery monitor bound to an ADC.
pub struct Battery<A: AdcRead> {
    adc: A,
    channel: u8,
}

impl<A: AdcRead> Battery<A> {
    /// Monitor the default battery sense channel.
    pub fn new(adc: A) -> Self {
        Self::on_channel(adc, BATTERY_CHANNEL)
    }

    pub fn on_channel(adc: A, channel: u8) -> Self {
        Self { adc, channel }
    }

    pub fn free(self) -> A {
        self.adc
    }

    /// Raw conversion of the sense channel.
    #[inline]
    pub fn raw(&mut self) -> u16 {
        self.adc.read_channel(self.channel)
    }

    /// Current battery level in percent.
    pub fn percent(&mut self) -> u8 {
        percent_from_raw(self.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAdc {
        value: u16,
        last_channel: Option<u8>,
    }

    impl AdcRead for FixedAdc {
        fn read_channel(&mut self, ch: u8) -> u16 {
            self.last_channel = Some(ch);
            self.value
        }
    }

    #[test]
    fn percent_scales_and_offsets() {
        assert_eq!(percent_from_raw(400), 94);
        assert_eq!(percent_from_raw(24), 0);
        assert_eq!(percent_from_raw(28), 1);
    }

    #[test]
    fn percent_saturates_at_both_ends() {
        assert_eq!(percent_from_raw(0), 0);
        assert_eq!(percent_from_raw(23), 0);
        assert_eq!(percent_from_raw(1023), 100);
    }

    #[test]
    fn reads_the_battery_channel() {
        let adc = FixedAdc {
            value: 300,
            last_channel: None,
        };
        let mut battery = Battery::new(adc);
        assert_eq!(battery.percent(), 69);
        assert_eq!(battery.free().last_channel, Some(3));
    }
}
