// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed display screens.
//!
//! Every screen starts from a cleared display and writes at most [`DISPLAY_WIDTH`] characters per
//! line. Numbers are formatted with `itoa`.

use crate::config::DISPLAY_WIDTH;
use crate::drivers::{DisplayBus, Hd44780};

pub const PROMPT: [&str; 2] = ["give 2 taps:", "btn2 then btn1"];
pub const OUT_OF_TIME: [&str; 2] = ["You ran out", "of time!"];
pub const BPM_LABEL: &str = "BPM = ";
pub const SPLASH_TITLE: &str = "Metronome";
pub const BATTERY_LABEL: &str = "Batt life = ";
pub const LOADING_TITLE: &str = "Loading Data";

/// Width of the loading bar, leaving room for the percentage in front of it.
pub const LOADING_BAR_WIDTH: u8 = DISPLAY_WIDTH - 3;

/// Clear the display and write one line of text per entry.
pub fn show_lines<B: DisplayBus>(lcd: &mut Hd44780<B>, lines: &[&str]) -> Result<(), B::Error> {
    lcd.clear()?;
    for (line, text) in lines.iter().enumerate() {
        lcd.set_line(line as u8)?;
        lcd.write_str(text)?;
    }
    Ok(())
}

/// "give 2 taps:" / "btn2 then btn1"
pub fn prompt<B: DisplayBus>(lcd: &mut Hd44780<B>) -> Result<(), B::Error> {
    show_lines(lcd, &PROMPT)
}

/// "You ran out" / "of time!"
pub fn out_of_time<B: DisplayBus>(lcd: &mut Hd44780<B>) -> Result<(), B::Error> {
    show_lines(lcd, &OUT_OF_TIME)
}

/// "BPM = N" on the first line.
pub fn bpm<B: DisplayBus>(lcd: &mut Hd44780<B>, bpm: u32) -> Result<(), B::Error> {
    let mut buf = itoa::Buffer::new();
    lcd.clear()?;
    lcd.write_str(BPM_LABEL)?;
    lcd.write_str(buf.format(bpm))
}

/// Boot splash with the battery level on the second line.
pub fn splash<B: DisplayBus>(lcd: &mut Hd44780<B>, battery_percent: u8) -> Result<(), B::Error> {
    let mut buf = itoa::Buffer::new();
    show_lines(lcd, &[SPLASH_TITLE])?;
    lcd.set_line(1)?;
    lcd.write_str(BATTERY_LABEL)?;
    lcd.write_str(buf.format(battery_percent))?;
    lcd.write_data(b'%')
}

/// One frame of the loading screen: title, two-digit percentage and a bar.
pub fn loading<B: DisplayBus>(lcd: &mut Hd44780<B>, index: u16, max: u16) -> Result<(), B::Error> {
    let mut buf = itoa::Buffer::new();
    let percent = if max == 0 {
        100
    } else {
        (index.min(max) as u32 * 100 / max as u32) as u16
    };

    show_lines(lcd, &[LOADING_TITLE])?;
    lcd.set_line(1)?;
    if percent < 10 {
        lcd.write_data(b' ')?;
    }
    lcd.write_str(buf.format(percent))?;
    lcd.write_data(b'%')?;
    lcd.draw_progress_bar(index, max, LOADING_BAR_WIDTH)
}
