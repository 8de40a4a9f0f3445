// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

mod common;

use core::fmt::Write as _;

use common::{new_log, writes, Hd44780Model, LoggingClock, Op};
use metronome::control::screens;
use metronome::drivers::hd44780::{cmd, Register};
use metronome::drivers::Hd44780;

use Register::{Command, Data};

fn ready_display(model: Hd44780Model) -> Hd44780<Hd44780Model> {
    let clock = LoggingClock::<6_000>::new(new_log());
    let mut lcd = Hd44780::new(model);
    lcd.initialize(&clock).unwrap();
    lcd
}

#[test]
fn init_sequence_order_and_settle_ticks() {
    let log = new_log();
    let clock = LoggingClock::<6_000>::new(log.clone());
    let mut lcd = Hd44780::new(Hd44780Model::new(log.clone()));

    lcd.initialize(&clock).unwrap();

    assert_eq!(
        *log.borrow(),
        [
            Op::Wait(6_000),
            Op::Select(Command),
            Op::Write(Command, cmd::FUNCTION_SET_8BIT_2LINE),
            Op::Wait(8),
            Op::Write(Command, cmd::DISPLAY_ON),
            Op::Wait(8),
            Op::Write(Command, cmd::CLEAR),
            Op::Wait(300),
            Op::Write(Command, cmd::ENTRY_INCREMENT),
            Op::Wait(300),
        ]
    );
}

#[test]
fn init_waits_round_up_on_a_coarse_clock() {
    let log = new_log();
    let clock = LoggingClock::<1_000_000>::new(log.clone());
    let mut lcd = Hd44780::new(Hd44780Model::new(log.clone()));

    lcd.initialize(&clock).unwrap();

    let waits: Vec<u32> = log
        .borrow()
        .iter()
        .filter_map(|op| match *op {
            Op::Wait(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(waits, [36, 1, 1, 2, 2]);
}

#[test]
fn init_never_reads_the_busy_flag() {
    let log = new_log();
    let clock = LoggingClock::<6_000>::new(log.clone());
    let mut lcd = Hd44780::new(Hd44780Model::new(log.clone()).with_busy_polls(5));

    lcd.initialize(&clock).unwrap();

    assert!(!log.borrow().iter().any(|op| matches!(op, Op::Read(_))));
    assert_eq!(lcd.free().status_reads, 0);
}

#[test]
fn writing_text_advances_the_address_counter() {
    let mut lcd = ready_display(Hd44780Model::new(new_log()));

    lcd.write_str("Hello").unwrap();

    assert_eq!(lcd.address().unwrap(), 5);
    assert_eq!(lcd.bus().text(0), "Hello");
}

#[test]
fn address_counter_wraps_between_lines() {
    let mut lcd = ready_display(Hd44780Model::new(new_log()));

    lcd.set_cursor(0x26).unwrap();
    lcd.write_str("abc").unwrap();
    assert_eq!(lcd.address().unwrap(), 0x41);

    lcd.set_cursor(0x66).unwrap();
    lcd.write_str("xyz").unwrap();
    assert_eq!(lcd.address().unwrap(), 0x01);

    let model = lcd.free();
    assert_eq!(model.line(1).as_bytes()[0], b'c');
    assert_eq!(model.line(0).as_bytes()[0], b'z');
}

#[test]
fn every_write_waits_for_the_busy_flag() {
    let log = new_log();
    let mut lcd = Hd44780::new(Hd44780Model::new(log.clone()).with_busy_polls(3));

    lcd.write_str("Hi").unwrap();
    lcd.set_line(1).unwrap();
    lcd.write_data(b'!').unwrap();

    let model = lcd.free();
    assert_eq!(model.writes_while_busy, 0);
    assert!(model.busy_seen > 0);
    assert_eq!(model.text(0), "Hi");
    assert_eq!(model.text(1), "!");

    // A status read separates every pair of writes.
    let ops = log.borrow();
    let mut read_since_write = true;
    for op in ops.iter() {
        match op {
            Op::Read(Command) => read_since_write = true,
            Op::Write(..) => {
                assert!(read_since_write, "write without a status poll: {ops:?}");
                read_since_write = false;
            }
            _ => {}
        }
    }
}

#[test]
fn busy_port_is_waited_out_before_each_cycle() {
    let mut lcd = Hd44780::new(Hd44780Model::new(new_log()).with_bus_busy(2));

    lcd.write_str("ok").unwrap();

    let model = lcd.free();
    assert_eq!(model.text(0), "ok");
    // Each write: two idle waits for the status poll, one before the write itself.
    assert!(model.bus_idle_checks >= 2 * 3 * 3);
}

#[test]
fn read_data_returns_the_character_at_the_cursor() {
    let mut lcd = ready_display(Hd44780Model::new(new_log()));

    lcd.write_str("AB").unwrap();
    lcd.set_cursor(0x01).unwrap();

    assert_eq!(lcd.read_data().unwrap(), b'B');
    assert_eq!(lcd.bus().address(), 0x03);
    assert_eq!(lcd.address().unwrap(), 0x03);
}

#[test]
fn clear_and_home_reset_the_cursor() {
    let log = new_log();
    let mut lcd = ready_display(Hd44780Model::new(log.clone()));

    lcd.write_str("junk").unwrap();
    lcd.home().unwrap();
    assert_eq!(lcd.address().unwrap(), 0);
    assert_eq!(lcd.bus().text(0), "junk");

    lcd.clear().unwrap();
    assert_eq!(lcd.bus().text(0), "");
}

#[test]
fn fmt_write_formats_onto_the_display() {
    let mut lcd = ready_display(Hd44780Model::new(new_log()));

    write!(lcd, "{}-{}", 12, "ab").unwrap();

    assert_eq!(lcd.bus().text(0), "12-ab");
}

#[test]
fn prompt_and_timeout_screens() {
    let mut lcd = ready_display(Hd44780Model::new(new_log()));

    screens::prompt(&mut lcd).unwrap();
    assert_eq!(lcd.bus().text(0), "give 2 taps:");
    assert_eq!(lcd.bus().text(1), "btn2 then btn1");

    screens::out_of_time(&mut lcd).unwrap();
    assert_eq!(lcd.bus().text(0), "You ran out");
    assert_eq!(lcd.bus().text(1), "of time!");
}

#[test]
fn bpm_screen_replaces_the_prompt() {
    let log = new_log();
    let mut lcd = ready_display(Hd44780Model::new(log.clone()));
    screens::prompt(&mut lcd).unwrap();

    screens::bpm(&mut lcd, 60).unwrap();

    assert_eq!(lcd.bus().text(0), "BPM = 60");
    assert_eq!(lcd.bus().text(1), "");
    assert_eq!(writes(&log).last(), Some(&(Data, b'0')));
}

#[test]
fn splash_shows_battery_percentage() {
    let mut lcd = ready_display(Hd44780Model::new(new_log()));

    screens::splash(&mut lcd, 94).unwrap();

    assert_eq!(lcd.bus().text(0), "Metronome");
    assert_eq!(lcd.bus().text(1), "Batt life = 94%");
}

#[test]
fn loading_screen_draws_percent_and_bar() {
    let mut lcd = ready_display(Hd44780Model::new(new_log()));

    screens::loading(&mut lcd, 50, 100).unwrap();
    assert_eq!(lcd.bus().text(0), "Loading Data");
    assert_eq!(lcd.bus().line(1), "50%######       ");

    screens::loading(&mut lcd, 5, 100).unwrap();
    assert_eq!(lcd.bus().line(1), " 5%             ");

    screens::loading(&mut lcd, 100, 100).unwrap();
    assert_eq!(lcd.bus().line(1), "100%############");
}
