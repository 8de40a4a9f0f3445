// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! General-purpose timers via direct PAC register access.
//!
//! - TIM2 and TIM5 run as periodic update-interrupt sources for the tick counter and the button
//!   sampler.
//! - TIM3 free-runs with a 6 µs tick and backs the display settle waits.
//!
//! All three sit on APB1. `timer_hz` is the timer kernel clock, which equals PCLK1 while the APB1
//! prescaler is 1 (the reset configuration).

use stm32f7xx_hal::pac;

use crate::config::DISPLAY_TICK_NS;
use crate::timing::TickSource;

/// Prescaler that divides `timer_hz` down to a 1 MHz count.
fn prescaler_for_1mhz(timer_hz: u32) -> u32 {
    (timer_hz / 1_000_000).max(1) - 1
}

/// Timer that raises an update interrupt once per period.
pub struct PeriodicTimer<TIM> {
    tim: TIM,
}

impl<TIM> PeriodicTimer<TIM> {
    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> TIM {
        self.tim
    }
}

macro_rules! periodic_timer {
    ($TIM:ident, $ctor:ident, $en:ident) => {
        impl PeriodicTimer<pac::$TIM> {
            #[doc = concat!("Configure ", stringify!($TIM), " to interrupt every `period_us` microseconds.")]
            pub fn $ctor(tim: pac::$TIM, timer_hz: u32, period_us: u32) -> Self {
                let rcc = unsafe { &*pac::RCC::ptr() };
                rcc.apb1enr.modify(|_, w| w.$en().set_bit());

                // Disable counter while configuring
                tim.cr1.modify(|_, w| w.cen().clear_bit());

                // 1 µs per count, reload after `period_us` counts
                tim.psc.write(|w| unsafe { w.bits(prescaler_for_1mhz(timer_hz)) });
                tim.arr.write(|w| unsafe { w.bits(period_us.max(1) - 1) });

                // Load PSC/ARR now, then drop the update flag that raised
                tim.egr.write(|w| w.ug().set_bit());
                tim.sr.modify(|_, w| w.uif().clear_bit());

                tim.dier.modify(|_, w| w.uie().set_bit());
                tim.cr1.modify(|_, w| w.cen().set_bit());

                Self { tim }
            }

            #[doc = concat!("Acknowledge the update interrupt. Call once per ", stringify!($TIM), " interrupt.")]
            #[inline]
            pub fn clear_update(&mut self) {
                self.tim.sr.modify(|_, w| w.uif().clear_bit());
            }
        }
    };
}

periodic_timer!(TIM2, tim2, tim2en);
periodic_timer!(TIM5, tim5, tim5en);

/// TIM3 counting up in 6 µs steps with no interrupt.
///
/// The 16-bit counter wraps after about 390 ms, which bounds a single wait. The longest display
/// wait is the 36 ms power-on delay.
pub struct FreeRunningTimer {
    tim: pac::TIM3,
}

impl FreeRunningTimer {
    pub fn tim3(tim3: pac::TIM3, timer_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        let tim = tim3;
        let counts_per_tick = (timer_hz as u64 * DISPLAY_TICK_NS as u64 / 1_000_000_000).max(1);

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // Auto-reload: max 16-bit
        tim.psc
            .write(|w| unsafe { w.bits((counts_per_tick - 1).min(0xFFFF) as u32) });
        tim.arr.write(|w| unsafe { w.bits(0xFFFF) });
        tim.egr.write(|w| w.ug().set_bit());

        // Reset counter
        tim.cnt.write(|w| unsafe { w.bits(0) });

        // Enable counter
        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { tim }
    }

    pub fn free(self) -> pac::TIM3 {
        self.tim
    }
}

impl TickSource for FreeRunningTimer {
    const TICK_NS: u32 = DISPLAY_TICK_NS;

    /// Update event: clears CNT and the prescaler counter together.
    #[inline]
    fn restart(&self) {
        self.tim.egr.write(|w| w.ug().set_bit());
    }

    #[inline]
    fn ticks(&self) -> u32 {
        self.tim.cnt.read().bits() & 0xFFFF
    }
}
