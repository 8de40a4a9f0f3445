// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running tick counters and duration-based waits.
//!
//! Every wait re-baselines its source to 0 and spins until the count reaches the target. Callers
//! never subtract snapshots, so a wrap of the underlying counter cannot produce a bogus interval.

use core::hint::spin_loop;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::TICK_PERIOD_US;

/// A counter that advances by one per fixed-length tick.
pub trait TickSource {
    /// Length of one tick in nanoseconds.
    const TICK_NS: u32;

    /// Reset the count to zero.
    ///
    /// The first tick after a restart must be a full tick. A source with a prescaler has to
    /// restart the prescaler phase as well, or a wait can end up to one tick early.
    fn restart(&self);

    /// Ticks elapsed since the last restart.
    fn ticks(&self) -> u32;
}

/// Number of ticks of `T` covering at least `us` microseconds (rounded up).
pub fn ticks_for_us<T: TickSource>(us: u32) -> u32 {
    let ns = us as u64 * 1_000;
    let tick = T::TICK_NS.max(1) as u64;
    let ticks = ns.div_ceil(tick);
    ticks.min(u32::MAX as u64) as u32
}

/// Restart `timer` and block until `ticks` have elapsed.
pub fn wait_ticks<T: TickSource>(timer: &T, ticks: u32) {
    timer.restart();
    while timer.ticks() < ticks {
        spin_loop();
    }
}

/// Restart `timer` and block for at least `us` microseconds.
#[inline]
pub fn wait_us<T: TickSource>(timer: &T, us: u32) {
    wait_ticks(timer, ticks_for_us::<T>(us));
}

/// Millisecond counter incremented from the tick interrupt.
///
/// The interrupt is the only incrementer. The main flow reads the count and re-baselines it with
/// [`TickSource::restart`] before each measurement window.
pub struct TickCounter {
    count: AtomicU32,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Advance by one tick. Wraps silently on overflow.
    #[inline]
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for TickCounter {
    const TICK_NS: u32 = TICK_PERIOD_US * 1_000;

    #[inline]
    fn restart(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    #[inline]
    fn ticks(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }
}

impl<T: TickSource> TickSource for &T {
    const TICK_NS: u32 = T::TICK_NS;

    #[inline]
    fn restart(&self) {
        (**self).restart();
    }

    #[inline]
    fn ticks(&self) -> u32 {
        (**self).ticks()
    }
}
