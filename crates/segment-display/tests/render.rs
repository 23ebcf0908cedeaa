use core::cell::RefCell;

use my9221::mock::BusTrace;
use my9221::{DriverConfig, InputPolicy, My9221};
use segment_display::{Counter, CounterDisplay, DISPLAY_COMMAND};

const ON: u16 = 255;

#[test]
fn forty_seven_on_two_modules() {
    let trace = RefCell::new(BusTrace::new());
    let (di, dcki, delay) = BusTrace::pins(&trace);
    let mut driver = My9221::new(di, dcki, delay, DriverConfig::new(2)).unwrap();
    driver.command_set(DISPLAY_COMMAND);

    CounterDisplay::default()
        .render(&mut driver, Counter::new(47))
        .unwrap();
    driver.refresh().unwrap();

    let words: Vec<u16> = trace.borrow().words().collect();
    assert_eq!(words.len(), 26);

    // Each IC sends OUT3, OUT2, OUT1 then OUT0, A B C within a group.
    // IC 1, tens: '4' = 0x8e, segments 1, 2 (OUT0 B C), 3 (OUT1 A), 7 (OUT2 B)
    assert_eq!(
        words[..13],
        [0x0410, 0, 0, 0, 0, ON, 0, ON, 0, 0, 0, ON, ON]
    );
    // IC 2, ones: '7' = 0x96, segments 1, 2 (OUT0 B C), 4 (OUT1 B), 7 (OUT2 B)
    assert_eq!(
        words[13..],
        [0x0410, 0, 0, 0, 0, ON, 0, 0, ON, 0, 0, ON, ON]
    );
    assert_eq!(trace.borrow().latches(), 1);
}

#[test]
fn render_overwrites_previous_digits() {
    let trace = RefCell::new(BusTrace::new());
    let (di, dcki, delay) = BusTrace::pins(&trace);
    let mut driver = My9221::new(di, dcki, delay, DriverConfig::new(2)).unwrap();
    driver.command_set(DISPLAY_COMMAND);
    let display = CounterDisplay::default();

    display.render(&mut driver, Counter::new(88)).unwrap();
    display.render(&mut driver, Counter::new(11)).unwrap();

    // '1': OUT0 B and C, the last two words of the IC
    let one = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, ON, ON];
    assert_eq!(driver.registers(1).unwrap().to_raw(), one);
    assert_eq!(driver.registers(2).unwrap().to_raw(), one);
}

#[test]
fn layout_outside_chain_is_rejected_when_strict() {
    let trace = RefCell::new(BusTrace::new());
    let (di, dcki, delay) = BusTrace::pins(&trace);
    let config = DriverConfig::new(1).with_policy(InputPolicy::Strict);
    let mut driver = My9221::new(di, dcki, delay, config).unwrap();

    let result = CounterDisplay::default().render(&mut driver, Counter::new(3));
    assert_eq!(result, Err(my9221::Error::IcIndexOutOfRange(2)));
}
