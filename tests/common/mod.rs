// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side models shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use metronome::drivers::hd44780::{DisplayBus, Register, BUSY_FLAG, LINE_ADDRESS};
use metronome::drivers::{Signal, Signals};
use metronome::timing::TickSource;

/// One observable action on the bus or the clock.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Op {
    Select(Register),
    Write(Register, u8),
    Read(Register),
    /// A wait that spun until the clock read this many ticks.
    Wait(u32),
}

pub type Log = Rc<RefCell<Vec<Op>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Bus operations only, waits filtered out.
pub fn writes(log: &Log) -> Vec<(Register, u8)> {
    log.borrow()
        .iter()
        .filter_map(|op| match *op {
            Op::Write(reg, byte) => Some((reg, byte)),
            _ => None,
        })
        .collect()
}

/// HD44780 controller behind a pipelined parallel port.
///
/// - Every write keeps the busy flag up for `busy_polls` status reads.
/// - The data address counter wraps 0x27 -> 0x40 and 0x67 -> 0x00, like a two-line controller.
/// - Each read returns the latch from the previous cycle and then runs a new controller read.
pub struct Hd44780Model {
    log: Log,
    selected: Register,
    ddram: [u8; 0x80],
    address: u8,
    latch: u8,
    busy_polls: u32,
    busy_remaining: u32,
    bus_busy_polls: u32,
    bus_busy_remaining: u32,
    pub status_reads: u32,
    pub busy_seen: u32,
    pub bus_idle_checks: u32,
    pub writes_while_busy: u32,
}

impl Hd44780Model {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            selected: Register::Command,
            ddram: [b' '; 0x80],
            address: 0,
            latch: 0,
            busy_polls: 0,
            busy_remaining: 0,
            bus_busy_polls: 0,
            bus_busy_remaining: 0,
            status_reads: 0,
            busy_seen: 0,
            bus_idle_checks: 0,
            writes_while_busy: 0,
        }
    }

    /// Keep the busy flag up for `polls` status reads after each write.
    pub fn with_busy_polls(mut self, polls: u32) -> Self {
        self.busy_polls = polls;
        self
    }

    /// Report the port itself busy `polls` times before every cycle.
    pub fn with_bus_busy(mut self, polls: u32) -> Self {
        self.bus_busy_polls = polls;
        self.bus_busy_remaining = polls;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Text currently shown on `line`.
    pub fn line(&self, line: usize) -> String {
        let start = LINE_ADDRESS[line] as usize;
        self.ddram[start..start + 16]
            .iter()
            .map(|&b| if b == 0xFF { '#' } else { b as char })
            .collect()
    }

    /// Text on `line` with trailing blanks removed.
    pub fn text(&self, line: usize) -> String {
        self.line(line).trim_end().to_string()
    }

    fn advance(&mut self) {
        self.address = match self.address {
            0x27 => 0x40,
            0x67 => 0x00,
            a => (a + 1) & 0x7F,
        };
    }

    fn command(&mut self, code: u8) {
        if code & 0x80 != 0 {
            self.address = code & 0x7F;
        } else if code & 0x40 != 0 {
            // CGRAM addressing is accepted and otherwise ignored.
        } else if code == 0x01 {
            self.ddram = [b' '; 0x80];
            self.address = 0;
        } else if code & 0xFE == 0x02 {
            self.address = 0;
        }
    }

    fn controller_read(&mut self) -> u8 {
        match self.selected {
            Register::Command => {
                self.status_reads += 1;
                let busy = if self.busy_remaining > 0 {
                    self.busy_remaining -= 1;
                    self.busy_seen += 1;
                    BUSY_FLAG
                } else {
                    0
                };
                busy | self.address
            }
            Register::Data => {
                let b = self.ddram[self.address as usize];
                self.advance();
                b
            }
        }
    }

    fn cycle_started(&mut self) {
        self.bus_busy_remaining = self.bus_busy_polls;
    }
}

impl DisplayBus for Hd44780Model {
    type Error = Infallible;

    fn is_busy(&mut self) -> Result<bool, Infallible> {
        self.bus_idle_checks += 1;
        if self.bus_busy_remaining > 0 {
            self.bus_busy_remaining -= 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn select(&mut self, register: Register) -> Result<(), Infallible> {
        self.selected = register;
        self.log.borrow_mut().push(Op::Select(register));
        Ok(())
    }

    fn write(&mut self, byte: u8) -> Result<(), Infallible> {
        self.log.borrow_mut().push(Op::Write(self.selected, byte));
        if self.busy_remaining > 0 {
            self.writes_while_busy += 1;
        }
        match self.selected {
            Register::Command => self.command(byte),
            Register::Data => {
                self.ddram[self.address as usize] = byte;
                self.advance();
            }
        }
        self.busy_remaining = self.busy_polls;
        self.cycle_started();
        Ok(())
    }

    fn read(&mut self) -> Result<u8, Infallible> {
        self.log.borrow_mut().push(Op::Read(self.selected));
        let out = self.latch;
        self.latch = self.controller_read();
        self.cycle_started();
        Ok(out)
    }
}

/// Clock that advances one tick per read and logs every wait it serves.
pub struct LoggingClock<const NS: u32> {
    log: Log,
    now: Cell<u32>,
    entry: Cell<Option<usize>>,
}

impl<const NS: u32> LoggingClock<NS> {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            now: Cell::new(0),
            entry: Cell::new(None),
        }
    }
}

impl<const NS: u32> TickSource for LoggingClock<NS> {
    const TICK_NS: u32 = NS;

    fn restart(&self) {
        self.now.set(0);
        let mut log = self.log.borrow_mut();
        log.push(Op::Wait(0));
        self.entry.set(Some(log.len() - 1));
    }

    fn ticks(&self) -> u32 {
        let t = self.now.get();
        self.now.set(t + 1);
        if let Some(i) = self.entry.get() {
            self.log.borrow_mut()[i] = Op::Wait(t);
        }
        t
    }
}

/// Clock that advances one tick per read, without logging.
pub struct FreeClock<const NS: u32> {
    pub now: Cell<u32>,
    pub restarts: Cell<u32>,
}

impl<const NS: u32> FreeClock<NS> {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            restarts: Cell::new(0),
        }
    }
}

impl<const NS: u32> TickSource for FreeClock<NS> {
    const TICK_NS: u32 = NS;

    fn restart(&self) {
        self.now.set(0);
        self.restarts.set(self.restarts.get() + 1);
    }

    fn ticks(&self) -> u32 {
        let t = self.now.get();
        self.now.set(t + 1);
        t
    }
}

/// Clock the test moves by hand.
pub struct ManualClock {
    pub now: Cell<u32>,
    pub restarts: Cell<u32>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            restarts: Cell::new(0),
        }
    }

    pub fn advance(&self, n: u32) {
        self.now.set(self.now.get().wrapping_add(n));
    }
}

impl TickSource for ManualClock {
    const TICK_NS: u32 = 1_000_000;

    fn restart(&self) {
        self.now.set(0);
        self.restarts.set(self.restarts.get() + 1);
    }

    fn ticks(&self) -> u32 {
        self.now.get()
    }
}

/// Error raised by [`RecordingSignals`] once its budget runs out.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OutOfBudget;

/// Records every signal; fails after `budget` calls when one is set.
pub struct RecordingSignals {
    pub shown: Vec<Signal>,
    budget: Option<usize>,
}

impl RecordingSignals {
    pub fn new() -> Self {
        Self {
            shown: Vec::new(),
            budget: None,
        }
    }

    pub fn failing_after(budget: usize) -> Self {
        Self {
            shown: Vec::new(),
            budget: Some(budget),
        }
    }
}

impl Signals for RecordingSignals {
    type Error = OutOfBudget;

    fn show(&mut self, signal: Signal) -> Result<(), OutOfBudget> {
        if self.budget.is_some_and(|b| self.shown.len() >= b) {
            return Err(OutOfBudget);
        }
        self.shown.push(signal);
        Ok(())
    }
}
