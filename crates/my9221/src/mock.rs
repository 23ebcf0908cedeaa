//! Simulated bus for host tests
//!
//! [`BusTrace`] watches the DI/DCKI levels the way an IC does: every DCKI edge
//! shifts in the DI level, sixteen bits make a word, and four DI pulses with no
//! clock edge in between make a latch. [`TracePin`] and [`TraceDelay`] feed it.
//!
//! The module also installs the host's `critical-section` implementation: a
//! process-wide mutex, re-entrant per thread. Every pin change records whether
//! the writing thread was inside `critical_section::with`, so tests can check
//! the timing-sensitive sequences really ran with preemption held off. Builds
//! that enable `mock` must not link another implementation (such as the
//! `critical-section/std` feature).
//!
//! ```
//! use core::cell::RefCell;
//! use my9221::mock::{BusTrace, Frame};
//! use my9221::{DriverConfig, My9221};
//!
//! let trace = RefCell::new(BusTrace::new());
//! let (di, dcki, delay) = BusTrace::pins(&trace);
//! let mut driver = My9221::new(di, dcki, delay, DriverConfig::new(1)).unwrap();
//! driver.refresh().unwrap();
//!
//! assert_eq!(trace.borrow().words().count(), 13);
//! assert_eq!(trace.borrow().frames().last(), Some(&Frame::Latch));
//! assert_eq!(trace.borrow().unguarded_transitions(), 0);
//! ```

extern crate std;

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::sync::{Mutex, MutexGuard, PoisonError};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::bus::{LATCH_PULSES, WORD_BITS};

/// Frames the trace can hold, enough for several refreshes of a full chain
pub const MAX_FRAMES: usize = 1024;

static SECTION_LOCK: Mutex<()> = Mutex::new(());

std::thread_local! {
    static SECTION_DEPTH: Cell<usize> = const { Cell::new(0) };
    static SECTION_GUARD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

struct TraceCriticalSection;
critical_section::set_impl!(TraceCriticalSection);

unsafe impl critical_section::Impl for TraceCriticalSection {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        let depth = SECTION_DEPTH.get();
        if depth == 0 {
            let guard = SECTION_LOCK
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            SECTION_GUARD.set(Some(guard));
        }
        SECTION_DEPTH.set(depth + 1);
    }

    unsafe fn release(_: critical_section::RawRestoreState) {
        let depth = SECTION_DEPTH.get().saturating_sub(1);
        SECTION_DEPTH.set(depth);
        if depth == 0 {
            drop(SECTION_GUARD.take());
        }
    }
}

/// Whether the calling thread is inside `critical_section::with`
pub fn critical_section_held() -> bool {
    SECTION_DEPTH.get() > 0
}

/// Something the simulated IC recognised on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Word(u16),
    Latch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Data,
    Clock,
}

/// Decoded bus activity
#[derive(Debug)]
pub struct BusTrace {
    data: bool,
    clock: bool,
    shift: u16,
    shifted_bits: u32,
    data_pulses: u32,
    settled: bool,
    frames: heapless::Vec<Frame, MAX_FRAMES>,
    clock_edges: usize,
    transitions: usize,
    unsettled_transitions: usize,
    unguarded_transitions: usize,
    shortest_settle_ns: Option<u32>,
}

impl Default for BusTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl BusTrace {
    pub fn new() -> Self {
        Self {
            data: false,
            clock: false,
            shift: 0,
            shifted_bits: 0,
            data_pulses: 0,
            settled: true,
            frames: heapless::Vec::new(),
            clock_edges: 0,
            transitions: 0,
            unsettled_transitions: 0,
            unguarded_transitions: 0,
            shortest_settle_ns: None,
        }
    }

    /// Data pin, clock pin and delay sharing one trace
    pub fn pins(trace: &RefCell<BusTrace>) -> (TracePin<'_>, TracePin<'_>, TraceDelay<'_>) {
        (
            TracePin {
                line: Line::Data,
                trace,
            },
            TracePin {
                line: Line::Clock,
                trace,
            },
            TraceDelay { trace },
        )
    }

    pub fn frames(&self) -> &[Frame] {
        self.frames.as_slice()
    }

    /// Every word, latches skipped
    pub fn words(&self) -> impl Iterator<Item = u16> + '_ {
        self.frames.iter().filter_map(|frame| match frame {
            Frame::Word(word) => Some(*word),
            Frame::Latch => None,
        })
    }

    pub fn latches(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| **frame == Frame::Latch)
            .count()
    }

    /// Current (data, clock) levels
    pub fn levels(&self) -> (bool, bool) {
        (self.data, self.clock)
    }

    /// Bits shifted in that do not yet form a whole word
    pub fn pending_bits(&self) -> u32 {
        self.shifted_bits
    }

    pub fn clock_edges(&self) -> usize {
        self.clock_edges
    }

    /// Level changes on either line
    pub fn transitions(&self) -> usize {
        self.transitions
    }

    /// Level changes that followed another change with no delay in between
    pub fn unsettled_transitions(&self) -> usize {
        self.unsettled_transitions
    }

    /// Level changes made outside a critical section
    pub fn unguarded_transitions(&self) -> usize {
        self.unguarded_transitions
    }

    pub fn shortest_settle_ns(&self) -> Option<u32> {
        self.shortest_settle_ns
    }

    pub fn reset(&mut self) {
        *self = Self {
            data: self.data,
            clock: self.clock,
            ..Self::new()
        };
    }

    fn set(&mut self, line: Line, high: bool, guarded: bool) {
        let changed = match line {
            Line::Data => core::mem::replace(&mut self.data, high) != high,
            Line::Clock => core::mem::replace(&mut self.clock, high) != high,
        };
        if !changed {
            return;
        }

        self.transitions += 1;
        if !self.settled {
            self.unsettled_transitions += 1;
        }
        self.settled = false;
        if !guarded {
            self.unguarded_transitions += 1;
        }

        match line {
            Line::Clock => self.on_clock_edge(),
            Line::Data => self.on_data_edge(high),
        }
    }

    fn on_clock_edge(&mut self) {
        self.clock_edges += 1;
        self.data_pulses = 0;

        self.shift = (self.shift << 1) | u16::from(self.data);
        self.shifted_bits += 1;
        if self.shifted_bits == WORD_BITS {
            self.push(Frame::Word(self.shift));
            self.shift = 0;
            self.shifted_bits = 0;
        }
    }

    fn on_data_edge(&mut self, high: bool) {
        if self.clock {
            return;
        }
        if high {
            self.data_pulses += 1;
        } else if self.data_pulses == LATCH_PULSES {
            self.push(Frame::Latch);
            self.data_pulses = 0;
        }
    }

    fn settle(&mut self, ns: u32) {
        self.settled = true;
        self.shortest_settle_ns = Some(self.shortest_settle_ns.map_or(ns, |s| s.min(ns)));
    }

    /// # Panics
    /// If the trace already holds [`MAX_FRAMES`] frames.
    fn push(&mut self, frame: Frame) {
        if self.frames.push(frame).is_err() {
            panic!("bus trace full: {} frames, reset it between refreshes", MAX_FRAMES);
        }
    }
}

/// One bus line feeding a [`BusTrace`]
pub struct TracePin<'a> {
    line: Line,
    trace: &'a RefCell<BusTrace>,
}

impl ErrorType for TracePin<'_> {
    type Error = Infallible;
}

impl OutputPin for TracePin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl TracePin<'_> {
    fn drive(&mut self, high: bool) {
        let guarded = critical_section_held();
        self.trace.borrow_mut().set(self.line, high, guarded);
    }
}

/// Delay that records settle times instead of waiting
pub struct TraceDelay<'a> {
    trace: &'a RefCell<BusTrace>,
}

impl DelayNs for TraceDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.borrow_mut().settle(ns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_is_tracked_per_thread_and_nests() {
        assert!(!critical_section_held());
        critical_section::with(|_| {
            assert!(critical_section_held());
            critical_section::with(|_| assert!(critical_section_held()));
            assert!(critical_section_held());
        });
        assert!(!critical_section_held());
    }

    #[test]
    fn pin_writes_record_the_section() {
        let trace = RefCell::new(BusTrace::new());
        let (mut di, mut dcki, _delay) = BusTrace::pins(&trace);

        di.set_high().unwrap();
        critical_section::with(|_| dcki.set_high().unwrap());

        assert_eq!(trace.borrow().transitions(), 2);
        assert_eq!(trace.borrow().unguarded_transitions(), 1);
    }

    #[test]
    #[should_panic(expected = "bus trace full")]
    fn full_trace_panics() {
        let mut trace = BusTrace::new();
        for _ in 0..=MAX_FRAMES {
            trace.push(Frame::Latch);
        }
    }
}
