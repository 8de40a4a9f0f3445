// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fire-once edge latch.
//!
//! The latch sets the first time its input reads pressed and stays set until the program restarts.
//! A transition guarded by it fires exactly once per program run, however many times the button
//! is polled while held down.

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeLatch {
    set: bool,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self { set: false }
    }

    /// Returns `true` only on the first call that sees `pressed`.
    pub fn rising(&mut self, pressed: bool) -> bool {
        if pressed && !self.set {
            self.set = true;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.set
    }
}
