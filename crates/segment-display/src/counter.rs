//! Two-digit decimal counter

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::trace;
use my9221::{
    BitDepth, ClockSource, CommandFields, CounterReset, Error, My9221, OscillatorDivider, Polarity,
    ShotMode, SlewRate, Waveform,
};

use crate::glyph::{Glyph, glyph_levels};

/// Command for segment modules: fast edges, 8-bit APDM on the internal clock
pub const DISPLAY_COMMAND: CommandFields = CommandFields {
    slew: SlewRate::Fast,
    bit_depth: BitDepth::Bits8,
    divider: OscillatorDivider::Div1,
    waveform: Waveform::Apdm,
    clock_source: ClockSource::Internal,
    polarity: Polarity::Led,
    counter_reset: CounterReset::FreeRun,
    shot: ShotMode::Repeat,
};

/// Counts 0 to 99 and wraps
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    value: u8,
}

impl Counter {
    pub const MAX: u8 = 99;

    /// Values above [`Counter::MAX`] wrap around
    pub const fn new(value: u8) -> Self {
        Self {
            value: value % (Self::MAX + 1),
        }
    }

    pub const fn value(self) -> u8 {
        self.value
    }

    pub const fn tens(self) -> u8 {
        self.value / 10
    }

    pub const fn ones(self) -> u8 {
        self.value % 10
    }

    pub fn advance(&mut self) {
        self.value = if self.value >= Self::MAX {
            0
        } else {
            self.value + 1
        };
    }
}

/// Which IC of the chain shows which digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDisplay {
    pub tens_ic: u8,
    pub ones_ic: u8,
}

impl Default for CounterDisplay {
    /// Tens on the module next to the host, ones on the one after it
    fn default() -> Self {
        Self {
            tens_ic: 1,
            ones_ic: 2,
        }
    }
}

impl CounterDisplay {
    /// Chain length the layout needs
    pub fn chain_len(&self) -> u8 {
        self.tens_ic.max(self.ones_ic)
    }

    /// Write both digits into the driver's register image.
    ///
    /// Nothing reaches the modules until the driver is refreshed.
    pub fn render<DI, DCKI, D>(
        &self,
        driver: &mut My9221<DI, DCKI, D>,
        counter: Counter,
    ) -> Result<(), Error>
    where
        DI: OutputPin,
        DCKI: OutputPin,
        D: DelayNs,
    {
        trace!("segment: render {:02}", counter.value());

        let tens = glyph_levels(Glyph::Digit(counter.tens()).pattern());
        let ones = glyph_levels(Glyph::Digit(counter.ones()).pattern());

        driver.data_set(&ones, self.ones_ic)?;
        driver.data_set(&tens, self.tens_ic)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_wraps_after_99() {
        let mut counter = Counter::new(98);
        counter.advance();
        assert_eq!(counter.value(), 99);
        counter.advance();
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn counter_splits_digits() {
        let counter = Counter::new(47);
        assert_eq!(counter.tens(), 4);
        assert_eq!(counter.ones(), 7);
        assert_eq!(Counter::new(5).tens(), 0);
    }

    #[test]
    fn out_of_range_start_wraps() {
        assert_eq!(Counter::new(100).value(), 0);
        assert_eq!(Counter::new(250).value(), 50);
    }

    #[test]
    fn display_command_word() {
        assert_eq!(DISPLAY_COMMAND.pack().bits(), 0x0410);
    }

    #[test]
    fn default_layout_needs_two_ics() {
        assert_eq!(CounterDisplay::default().chain_len(), 2);
    }
}
