// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Basic ADC support for STM32F7 using direct PAC register access.
//!
//! Thin wrapper around ADC1 with blocking, software-triggered single-channel reads at 10-bit
//! resolution.
//!
//! Example:
//! ```no_run
//! let mut adc1 = Adc::adc1(dp.ADC1);
//! let value = adc1.read(3);
//! ```

use stm32f7xx_hal::pac;

use crate::drivers::battery::AdcRead;

/// CR1.RES encoding for 10-bit conversions.
const RES_10BIT: u8 = 0b01;

/// Longest sample time (480 cycles) for the high-impedance battery divider.
const SAMPLE_TIME_480: u8 = 0b111;

/// ADC1 wrapper.
pub struct Adc<ADC> {
    adc: ADC,
}

impl<ADC> Adc<ADC> {
    #[inline]
    pub fn free(self) -> ADC {
        self.adc
    }
}

impl Adc<pac::ADC1> {
    /// Create and initialize ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };

        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        // 10-bit, right-aligned, software trigger
        adc1.cr1.modify(|_, w| w.res().bits(RES_10BIT));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        // Power on
        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Read a single channel.
    pub fn read(&mut self, channel: u8) -> u16 {
        let adc = &self.adc;

        // Configure long sample time for channel stability
        if channel <= 9 {
            adc.smpr2.modify(|_, w| match channel {
                0 => w.smp0().bits(SAMPLE_TIME_480),
                1 => w.smp1().bits(SAMPLE_TIME_480),
                2 => w.smp2().bits(SAMPLE_TIME_480),
                3 => w.smp3().bits(SAMPLE_TIME_480),
                4 => w.smp4().bits(SAMPLE_TIME_480),
                5 => w.smp5().bits(SAMPLE_TIME_480),
                6 => w.smp6().bits(SAMPLE_TIME_480),
                7 => w.smp7().bits(SAMPLE_TIME_480),
                8 => w.smp8().bits(SAMPLE_TIME_480),
                _ => w.smp9().bits(SAMPLE_TIME_480),
            });
        }

        // Sequence length = 1 conversion
        adc.sqr1.modify(|_, w| w.l().bits(0));

        // Set channel
        adc.sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        // Start
        adc.cr2.modify(|_, w| w.swstart().set_bit());

        // Wait for completion
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits() as u16
    }
}

impl AdcRead for Adc<pac::ADC1> {
    fn read_channel(&mut self, ch: u8) -> u16 {
        self.read(ch)
    }
}
