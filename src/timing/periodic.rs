// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Work driven by a fixed-period timer interrupt.
//!
//! A handler runs in interrupt context once per period. It must finish well inside one period,
//! must not block, and must never touch the display bus. Integer arithmetic and flag updates only.

use crate::config::TICK_PERIOD_US;
use crate::timing::TickCounter;

/// Periodic callback registered with a hardware timer.
pub trait PeriodicHandler {
    /// Nominal period between invocations, in microseconds.
    const PERIOD_US: u32;

    /// Called once per period from the timer interrupt.
    fn on_period(&mut self);
}

impl PeriodicHandler for &TickCounter {
    const PERIOD_US: u32 = TICK_PERIOD_US;

    #[inline]
    fn on_period(&mut self) {
        self.increment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TickSource;

    #[test]
    fn tick_handler_increments_once_per_period() {
        let counter = TickCounter::new();
        let mut handler = &counter;
        for _ in 0..7 {
            handler.on_period();
        }
        assert_eq!(counter.ticks(), 7);
        assert_eq!(<&TickCounter as PeriodicHandler>::PERIOD_US, 1_000);
    }
}
