//! Two-wire DI/DCKI bus
//!
//! The MY9221 samples DI on both edges of DCKI, so a 16-bit word takes eight
//! clock pulses. A latch is four DI pulses while DCKI stays low. Both sequences
//! are timing sensitive and run inside a critical section.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin, PinState};

use crate::config::Timing;
use crate::error::Error;

/// Bits shifted per word
pub const WORD_BITS: u32 = 16;
/// Clock pulses per word, one bit per edge
pub const WORD_CLOCKS: u32 = WORD_BITS / 2;
/// DI pulses that make up a latch
pub const LATCH_PULSES: u32 = 4;

const MSB: u16 = 0x8000;

/// Bit-banged bus over a data pin, a clock pin and a delay
pub struct Bus<DI, DCKI, D> {
    di: DI,
    dcki: DCKI,
    delay: D,
    settle_ns: u32,
}

impl<DI, DCKI, D> Bus<DI, DCKI, D>
where
    DI: OutputPin,
    DCKI: OutputPin,
    D: DelayNs,
{
    pub fn new(di: DI, dcki: DCKI, delay: D, timing: Timing) -> Self {
        Self {
            di,
            dcki,
            delay,
            settle_ns: timing.settle_ns,
        }
    }

    /// Drive both lines low
    pub fn idle(&mut self) -> Result<(), Error> {
        self.data(false)?;
        self.clock(false)
    }

    /// Shift one word out, most significant bit first.
    pub fn send_word(&mut self, word: u16) -> Result<(), Error> {
        critical_section::with(|_| self.shift_word(word))
    }

    /// Commit shifted data to the outputs of every IC on the bus.
    pub fn latch(&mut self) -> Result<(), Error> {
        critical_section::with(|_| self.pulse_latch())
    }

    pub fn release(self) -> (DI, DCKI, D) {
        (self.di, self.dcki, self.delay)
    }

    fn shift_word(&mut self, word: u16) -> Result<(), Error> {
        let mut bits = word;

        self.clock(false)?;
        self.settle();

        for _ in 0..WORD_CLOCKS {
            self.data(bits & MSB != 0)?;
            bits <<= 1;
            self.settle();

            self.clock(true)?;
            self.settle();

            self.data(bits & MSB != 0)?;
            bits <<= 1;
            self.settle();

            self.clock(false)?;
            self.settle();
        }

        self.data(false)?;
        self.settle();
        self.clock(false)
    }

    fn pulse_latch(&mut self) -> Result<(), Error> {
        self.clock(false)?;
        self.settle();

        for _ in 0..LATCH_PULSES {
            self.data(true)?;
            self.settle();
            self.data(false)?;
            self.settle();
        }

        self.clock(false)
    }

    fn data(&mut self, high: bool) -> Result<(), Error> {
        self.di
            .set_state(PinState::from(high))
            .map_err(|e| Error::Pin(e.kind()))
    }

    fn clock(&mut self, high: bool) -> Result<(), Error> {
        self.dcki
            .set_state(PinState::from(high))
            .map_err(|e| Error::Pin(e.kind()))
    }

    #[inline]
    fn settle(&mut self) {
        self.delay.delay_ns(self.settle_ns);
    }
}
