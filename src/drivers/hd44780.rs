// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HD44780-compatible character display over an 8-bit parallel bus.
//!
//! The controller exposes two registers: command/status at address 0 and data at address 1. Every
//! command or data write first polls the busy flag (bit 7 of the status register) until it clears.
//! There is no timeout: a controller that never drops its busy flag hangs the caller.
//!
//! The bus itself is injected through [`DisplayBus`], which models a parallel master port: reads
//! are pipelined, so each read returns the byte latched by the previous read cycle and starts a
//! new one. [`Hd44780::read_status`] therefore issues a dummy read before the real one.
//!
//! None of these operations may run in interrupt context.

use core::fmt;
use core::hint::spin_loop;

use crate::timing::{wait_us, TickSource};

/// Register addresses on the display bus.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Command writes, status reads.
    Command = 0,
    /// Character data.
    Data = 1,
}

/// Command codes from the HD44780 instruction set.
pub mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    /// Entry mode: increment cursor, no display shift.
    pub const ENTRY_INCREMENT: u8 = 0x06;
    /// Display control: display on, cursor off, blink off.
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Function set: 8-bit interface, 2 lines, 5x7 font.
    pub const FUNCTION_SET_8BIT_2LINE: u8 = 0x38;
    pub const SET_CGRAM: u8 = 0x40;
    pub const SET_DDRAM: u8 = 0x80;
}

/// Busy flag in the status register.
pub const BUSY_FLAG: u8 = 0x80;

/// Address-counter bits in the status register.
pub const ADDRESS_MASK: u8 = 0x7F;

/// DDRAM address of the first character of each line.
pub const LINE_ADDRESS: [u8; 2] = [0x00, 0x40];

/// Full block glyph used by the progress bar.
pub const BRICK: u8 = 0xFF;

/// Minimum wait between power-up and the first command (datasheet asks for more than 30 ms).
pub const POWER_ON_WAIT_US: u32 = 36_000;

/// Settle time after function-set and display-control commands.
pub const SHORT_SETTLE_US: u32 = 48;

/// Settle time after clear and entry-mode commands.
pub const LONG_SETTLE_US: u32 = 1_800;

/// Power-on command sequence with the settle time that must follow each command.
pub const INIT_SEQUENCE: [(u8, u32); 4] = [
    (cmd::FUNCTION_SET_8BIT_2LINE, SHORT_SETTLE_US),
    (cmd::DISPLAY_ON, SHORT_SETTLE_US),
    (cmd::CLEAR, LONG_SETTLE_US),
    (cmd::ENTRY_INCREMENT, LONG_SETTLE_US),
];

/// Register-level access to the display bus.
pub trait DisplayBus {
    type Error;

    /// Whether a bus cycle is still in progress.
    fn is_busy(&mut self) -> Result<bool, Self::Error>;

    /// Select the register targeted by following reads and writes.
    fn select(&mut self, register: Register) -> Result<(), Self::Error>;

    /// Start a write cycle.
    fn write(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Return the byte latched by the previous read cycle and start a new read cycle.
    fn read(&mut self) -> Result<u8, Self::Error>;
}

/// Status register contents.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    raw: u8,
}

impl Status {
    #[inline]
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Controller is executing an instruction.
    #[inline]
    pub fn busy(&self) -> bool {
        (self.raw & BUSY_FLAG) != 0
    }

    /// Current address counter.
    #[inline]
    pub fn address(&self) -> u8 {
        self.raw & ADDRESS_MASK
    }
}

/// HD44780 driver bound to a display bus.
pub struct Hd44780<B: DisplayBus> {
    bus: B,
}

impl<B: DisplayBus> Hd44780<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the bus.
    pub fn free(self) -> B {
        self.bus
    }

    #[inline]
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Run the power-on initialization sequence.
    ///
    /// The busy flag is not valid before the function-set command, so this writes the sequence
    /// blind and relies on the settle waits instead. `timer` only has to guarantee the minimum
    /// elapsed time; its tick length sets the wait granularity.
    pub fn initialize<T: TickSource>(&mut self, timer: &T) -> Result<(), B::Error> {
        wait_us(timer, POWER_ON_WAIT_US);

        self.wait_bus_idle()?;
        self.bus.select(Register::Command)?;

        for (code, settle_us) in INIT_SEQUENCE {
            self.wait_bus_idle()?;
            self.bus.write(code)?;
            wait_us(timer, settle_us);
        }

        Ok(())
    }

    /// Read a register: dummy read to start the cycle, then the real read.
    pub fn read_status(&mut self, register: Register) -> Result<u8, B::Error> {
        self.wait_bus_idle()?;
        self.bus.select(register)?;
        let _ = self.bus.read()?;
        self.wait_bus_idle()?;
        self.bus.read()
    }

    /// Read and decode the status register.
    #[inline]
    pub fn status(&mut self) -> Result<Status, B::Error> {
        Ok(Status {
            raw: self.read_status(Register::Command)?,
        })
    }

    #[inline]
    pub fn is_busy(&mut self) -> Result<bool, B::Error> {
        Ok(self.status()?.busy())
    }

    /// Current cursor (address counter) position.
    #[inline]
    pub fn address(&mut self) -> Result<u8, B::Error> {
        Ok(self.status()?.address())
    }

    /// Read the character at the cursor.
    ///
    /// The dummy read and the real read each run a data read on the controller, so the address
    /// counter ends up two past where it started.
    #[inline]
    pub fn read_data(&mut self) -> Result<u8, B::Error> {
        self.read_status(Register::Data)
    }

    /// Write a byte to a register once the controller is ready.
    pub fn write(&mut self, register: Register, byte: u8) -> Result<(), B::Error> {
        while self.is_busy()? {
            spin_loop();
        }
        self.wait_bus_idle()?;
        self.bus.select(register)?;
        self.bus.write(byte)
    }

    #[inline]
    pub fn write_command(&mut self, code: u8) -> Result<(), B::Error> {
        self.write(Register::Command, code)
    }

    #[inline]
    pub fn write_data(&mut self, byte: u8) -> Result<(), B::Error> {
        self.write(Register::Data, byte)
    }

    /// Write each byte of `s` at the cursor, in order.
    pub fn write_str(&mut self, s: &str) -> Result<(), B::Error> {
        self.write_bytes(s.as_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), B::Error> {
        for &b in bytes {
            self.write_data(b)?;
        }
        Ok(())
    }

    /// Clear the display and return the cursor to address 0.
    #[inline]
    pub fn clear(&mut self) -> Result<(), B::Error> {
        self.write_command(cmd::CLEAR)
    }

    #[inline]
    pub fn home(&mut self) -> Result<(), B::Error> {
        self.write_command(cmd::HOME)
    }

    /// Move the cursor to a DDRAM address.
    #[inline]
    pub fn set_cursor(&mut self, address: u8) -> Result<(), B::Error> {
        self.write_command(cmd::SET_DDRAM | (address & ADDRESS_MASK))
    }

    /// Point the address counter at character-generator RAM.
    #[inline]
    pub fn set_cgram_address(&mut self, address: u8) -> Result<(), B::Error> {
        self.write_command(cmd::SET_CGRAM | (address & 0x3F))
    }

    /// Move the cursor to the start of `line`. Lines past the last one wrap.
    pub fn set_line(&mut self, line: u8) -> Result<(), B::Error> {
        let address = LINE_ADDRESS[line as usize % LINE_ADDRESS.len()];
        self.set_cursor(address)
    }

    /// Draw a bar `size` characters wide, filled in proportion to `index / max`.
    ///
    /// Unfilled cells are written as spaces so a shrinking bar erases its old tail.
    pub fn draw_progress_bar(&mut self, index: u16, max: u16, size: u8) -> Result<(), B::Error> {
        let filled = if max == 0 {
            size
        } else {
            let scaled = (size as u32 * index.min(max) as u32) / max as u32;
            scaled as u8
        };

        for _ in 0..filled {
            self.write_data(BRICK)?;
        }
        for _ in filled..size {
            self.write_data(b' ')?;
        }
        Ok(())
    }

    fn wait_bus_idle(&mut self) -> Result<(), B::Error> {
        while self.bus.is_busy()? {
            spin_loop();
        }
        Ok(())
    }
}

// Implement `core::fmt::Write` so we can use `write!` on the display.
impl<B: DisplayBus> fmt::Write for Hd44780<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Hd44780::write_str(self, s).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::vec::Vec;

    /// Bus that answers status reads with a scripted sequence and records writes.
    struct ScriptedBus {
        selected: Register,
        status: Vec<u8>,
        latch: u8,
        writes: Vec<(Register, u8)>,
        status_reads: usize,
    }

    impl ScriptedBus {
        fn new(status: &[u8]) -> Self {
            Self {
                selected: Register::Command,
                status: status.iter().rev().copied().collect(),
                latch: 0,
                writes: Vec::new(),
                status_reads: 0,
            }
        }
    }

    impl DisplayBus for ScriptedBus {
        type Error = Infallible;

        fn is_busy(&mut self) -> Result<bool, Infallible> {
            Ok(false)
        }

        fn select(&mut self, register: Register) -> Result<(), Infallible> {
            self.selected = register;
            Ok(())
        }

        fn write(&mut self, byte: u8) -> Result<(), Infallible> {
            self.writes.push((self.selected, byte));
            Ok(())
        }

        fn read(&mut self) -> Result<u8, Infallible> {
            let out = self.latch;
            self.status_reads += 1;
            self.latch = self.status.pop().unwrap_or(0);
            Ok(out)
        }
    }

    #[test]
    fn status_decodes_busy_and_address() {
        let s = Status { raw: 0x80 | 0x45 };
        assert!(s.busy());
        assert_eq!(s.address(), 0x45);
        assert!(!Status { raw: 0x12 }.busy());
    }

    #[test]
    fn read_status_discards_the_dummy_read() {
        let mut lcd = Hd44780::new(ScriptedBus::new(&[0x23]));
        assert_eq!(lcd.read_status(Register::Command).unwrap(), 0x23);
        assert_eq!(lcd.free().status_reads, 2);
    }

    #[test]
    fn write_polls_busy_flag_until_clear() {
        // Three busy reads, then ready.
        let mut lcd = Hd44780::new(ScriptedBus::new(&[0x80, 0x00, 0x80, 0x00, 0x80, 0x00, 0x00]));

        lcd.write_data(b'A').unwrap();

        let bus = lcd.free();
        assert_eq!(bus.writes, [(Register::Data, b'A')]);
        // Each status read is a dummy plus a real read; four polls in total.
        assert_eq!(bus.status_reads, 8);
    }

    #[test]
    fn command_helpers_mask_addresses() {
        let mut lcd = Hd44780::new(ScriptedBus::new(&[]));
        lcd.set_cursor(0xC5).unwrap();
        lcd.set_cgram_address(0xFF).unwrap();
        lcd.set_line(1).unwrap();
        lcd.set_line(2).unwrap();
        lcd.home().unwrap();

        let codes: Vec<u8> = lcd.free().writes.iter().map(|&(_, c)| c).collect();
        assert_eq!(codes, [0xC5, 0x7F, 0xC0, 0x80, 0x02]);
    }

    #[test]
    fn progress_bar_scales_and_pads() {
        let mut lcd = Hd44780::new(ScriptedBus::new(&[]));
        lcd.draw_progress_bar(50, 100, 13).unwrap();

        let cells: Vec<u8> = lcd.free().writes.iter().map(|&(_, c)| c).collect();
        assert_eq!(cells.len(), 13);
        assert_eq!(cells.iter().filter(|&&c| c == BRICK).count(), 6);
        assert!(cells[6..].iter().all(|&c| c == b' '));
    }

    #[test]
    fn progress_bar_clamps_index_and_handles_zero_max() {
        let mut lcd = Hd44780::new(ScriptedBus::new(&[]));
        lcd.draw_progress_bar(250, 100, 4).unwrap();
        lcd.draw_progress_bar(0, 0, 3).unwrap();

        let cells: Vec<u8> = lcd.free().writes.iter().map(|&(_, c)| c).collect();
        assert_eq!(cells, [BRICK; 7]);
    }
}
