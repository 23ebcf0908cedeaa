use core::cell::RefCell;

use my9221::mock::{BusTrace, Frame};
use my9221::{CHANNEL_COUNT, DriverConfig, My9221, Output, OutputRegisters};
use segment_display::{Counter, CounterDisplay, DISPLAY_COMMAND, Glyph};

const WORDS_PER_IC: usize = 1 + CHANNEL_COUNT;

/// Read a digit back from one IC's data words.
///
/// Segment `k` of a module is wired to `OUT(k / 3)`, sub-channel `k % 3`.
fn decode_digit(data: &[u16]) -> Option<u8> {
    let raw: [u16; CHANNEL_COUNT] = data.try_into().ok()?;
    let registers = OutputRegisters::from_raw(&raw);

    let mut pattern = 0u8;
    for segment in 0..8 {
        let group = registers.group(Output::ALL[segment / 3]);
        if [group.a, group.b, group.c][segment % 3] != 0 {
            pattern |= 1 << segment;
        }
    }
    (0..10).find(|digit| Glyph::Digit(*digit).pattern() == pattern)
}

#[test]
fn every_value_reaches_the_modules() {
    let trace = RefCell::new(BusTrace::new());
    let (di, dcki, delay) = BusTrace::pins(&trace);
    let display = CounterDisplay::default();
    let mut driver =
        My9221::new(di, dcki, delay, DriverConfig::new(display.chain_len())).unwrap();
    driver.command_set(DISPLAY_COMMAND);

    let mut counter = Counter::default();
    for step in 0..=200u32 {
        trace.borrow_mut().reset();

        display.render(&mut driver, counter).unwrap();
        driver.refresh().unwrap();

        let trace = trace.borrow();
        let frames = trace.frames();
        assert_eq!(frames.len(), 2 * WORDS_PER_IC + 1, "step {step}");
        assert_eq!(frames.last(), Some(&Frame::Latch));

        let words: Vec<u16> = trace.words().collect();
        let (tens, ones) = words.split_at(WORDS_PER_IC);
        assert_eq!(tens[0], DISPLAY_COMMAND.pack().bits());
        assert_eq!(ones[0], DISPLAY_COMMAND.pack().bits());
        assert_eq!(decode_digit(&tens[1..]), Some(counter.tens()), "step {step}");
        assert_eq!(decode_digit(&ones[1..]), Some(counter.ones()), "step {step}");
        assert!(words.iter().all(|w| *w == 0 || *w == 255 || *w == 0x0410));
        // OUT3 carries no segment
        assert_eq!(tens[1..4], [0, 0, 0]);
        assert_eq!(ones[1..4], [0, 0, 0]);
        assert_eq!(trace.unguarded_transitions(), 0);

        assert_eq!(counter.value(), (step % 100) as u8);
        counter.advance();
    }
}

#[test]
fn bus_is_idle_between_frames() {
    let trace = RefCell::new(BusTrace::new());
    let (di, dcki, delay) = BusTrace::pins(&trace);
    let mut driver = My9221::new(di, dcki, delay, DriverConfig::new(2)).unwrap();
    driver.command_set(DISPLAY_COMMAND);

    let display = CounterDisplay::default();
    for value in [0, 19, 99] {
        display.render(&mut driver, Counter::new(value)).unwrap();
        driver.refresh().unwrap();
        assert_eq!(trace.borrow().levels(), (false, false));
        assert_eq!(trace.borrow().pending_bits(), 0);
    }

    assert_eq!(trace.borrow().latches(), 3);
    assert_eq!(trace.borrow().unsettled_transitions(), 0);
}
