// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::cell::RefCell;
use core::convert::Infallible;
use core::fmt::Write as _;

use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use critical_section::Mutex;
#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use metronome::config::{DEBOUNCE_PERIOD_US, LOADING_STEP_TICKS, SPLASH_TICKS, TICK_PERIOD_US};
use metronome::control::{metronome::Error, screens, Metronome};
use metronome::drivers::{Battery, Hd44780, Indicators};
use metronome::hw::{
    Adc, BoardInput, BoardPins, FreeRunningTimer, Led, ParallelBus, PeriodicTimer, Usart,
};
use metronome::input::{ButtonSampler, SharedButtons};
use metronome::timing::{wait_ticks, PeriodicHandler, TickCounter};

type Sampler = ButtonSampler<'static, BoardInput<'C', 8>, BoardInput<'C', 9>>;

/// Millisecond counter, advanced by TIM2.
static TICKS: TickCounter = TickCounter::new();

/// Debounced button states, written by TIM5.
static BUTTONS: SharedButtons = SharedButtons::new();

/// Button pins, sampled in the TIM5 handler.
static SAMPLER: Mutex<RefCell<Option<Sampler>>> = Mutex::new(RefCell::new(None));

/// TIM2, used to clear its update flag in the handler.
static TICK_TIMER: Mutex<RefCell<Option<PeriodicTimer<pac::TIM2>>>> =
    Mutex::new(RefCell::new(None));

/// TIM5, used to clear its update flag in the handler.
static SAMPLE_TIMER: Mutex<RefCell<Option<PeriodicTimer<pac::TIM5>>>> =
    Mutex::new(RefCell::new(None));

/// Number of steps on the loading bar.
const LOADING_STEPS: u16 = 100;

/// Unwrap a result from a board output that cannot fail.
#[inline]
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let timer_hz = clocks.pclk1().raw();

    // GPIO
    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);

    // USART1 (DBG)
    let usart_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    let mut usart = Usart::new(serial);
    usart.println("metronome: boot");

    // Timers
    let display_timer = FreeRunningTimer::tim3(dp.TIM3, timer_hz);
    let tick_timer = PeriodicTimer::tim2(dp.TIM2, timer_hz, TICK_PERIOD_US);
    let sample_timer = PeriodicTimer::tim5(dp.TIM5, timer_hz, DEBOUNCE_PERIOD_US);
    let sampler = ButtonSampler::new(pins.buttons.btn1, pins.buttons.btn2, &BUTTONS);

    critical_section::with(|cs| {
        TICK_TIMER.borrow(cs).replace(Some(tick_timer));
        SAMPLE_TIMER.borrow(cs).replace(Some(sample_timer));
        SAMPLER.borrow(cs).replace(Some(sampler));
    });

    unsafe {
        NVIC::unmask(pac::Interrupt::TIM2);
        NVIC::unmask(pac::Interrupt::TIM5);
    }

    // LEDs
    let leds = pins.leds;
    let indicators = Indicators::new(
        infallible(Led::active_high(leds.led1)),
        infallible(Led::active_high(leds.led2)),
        infallible(Led::active_high(leds.led3)),
        infallible(Led::active_high(leds.led4)),
    );

    // Display
    let mut lcd = Hd44780::new(ParallelBus::gpioe(dp.GPIOE));
    infallible(lcd.initialize(&display_timer));
    usart.println("display: ready");

    // Battery splash and loading bar
    let _battery_pin = pins.battery;
    let mut battery = Battery::new(Adc::adc1(dp.ADC1));
    let percent = battery.percent();
    let _ = write!(usart, "battery: {}%\r\n", percent);

    infallible(screens::splash(&mut lcd, percent));
    wait_ticks(&TICKS, SPLASH_TICKS);
    for index in 0..=LOADING_STEPS {
        infallible(screens::loading(&mut lcd, index, LOADING_STEPS));
        wait_ticks(&TICKS, LOADING_STEP_TICKS);
    }

    // Tap tempo
    usart.println("tempo: press btn2, then tap btn1");
    let mut metronome = Metronome::new(lcd, indicators, &TICKS);
    match metronome.run_with(&BUTTONS, |event| usart.log_event(event)) {
        Ok(never) => match never {},
        Err(Error::Display(never)) => match never {},
        Err(Error::Signals(never)) => match never {},
    }
}

#[interrupt]
fn TIM2() {
    critical_section::with(|cs| {
        if let Some(timer) = TICK_TIMER.borrow_ref_mut(cs).as_mut() {
            timer.clear_update();
        }
    });

    let mut ticks = &TICKS;
    ticks.on_period();
}

#[interrupt]
fn TIM5() {
    critical_section::with(|cs| {
        if let Some(timer) = SAMPLE_TIMER.borrow_ref_mut(cs).as_mut() {
            timer.clear_update();
        }
        if let Some(sampler) = SAMPLER.borrow_ref_mut(cs).as_mut() {
            sampler.on_period();
        }
    });
}
