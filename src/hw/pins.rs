// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 metronome board.
//!
//! GPIOE PE0–PE10 are not split here: the display bus owns the whole port through
//! [`ParallelBus`](crate::hw::ParallelBus).

use stm32f7xx_hal::{
    gpio::{gpioa, Alternate, Analog},
    pac,
    prelude::*,
};

use crate::hw::gpio::{BoardInput, BoardOutput};

/// All board pins. Construct this once at startup using:
///
/// ```rust
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub buttons: ButtonPins,
    pub usart1: Usart1Pins,
    pub battery: gpioa::PA3<Analog>, // ADC1_IN3
}

/// Indicator LEDs, active-high
pub struct LedPins {
    pub led1: BoardOutput<'D', 8>,
    pub led2: BoardOutput<'D', 9>,
    pub led3: BoardOutput<'D', 10>,
    pub led4: BoardOutput<'D', 11>,
}

/// Push-buttons, active-high with pull-downs
pub struct ButtonPins {
    pub btn1: BoardInput<'C', 8>,
    pub btn2: BoardInput<'C', 9>,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();

        Self {
            leds: LedPins {
                led1: BoardOutput::new(gpiod.pd8),
                led2: BoardOutput::new(gpiod.pd9),
                led3: BoardOutput::new(gpiod.pd10),
                led4: BoardOutput::new(gpiod.pd11),
            },

            buttons: ButtonPins {
                btn1: BoardInput::pull_down(gpioc.pc8),
                btn2: BoardInput::pull_down(gpioc.pc9),
            },

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            battery: gpioa.pa3.into_analog(),
        }
    }
}
