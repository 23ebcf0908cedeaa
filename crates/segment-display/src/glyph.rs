//! Segment patterns
//!
//! ```text
//!      a
//!     ---
//!  f | g | b
//!     ---
//!  e |   | c   :
//!     ---
//!      d
//! ```
//!
//! Pattern bits, MSB first: `f e d a g b c colon`. Bit `k` drives output group
//! `OUT(k / 3)`, sub-channel `k % 3` (A, B, C) of the module's MY9221: the colon
//! sits on `OUT0` A, segments `c b g` on `OUT0` B, C and `OUT1` A, and so on.

use my9221::registers::CHANNELS_PER_GROUP;
use my9221::{CHANNEL_COUNT, Output};

/// Segment channels used on a digit module
pub const SEGMENT_COUNT: usize = 8;

const DIGITS: [u8; 10] = [
    0xf6, // 0
    0x06, // 1
    0x7c, // 2
    0x3e, // 3
    0x8e, // 4
    0xba, // 5
    0xfa, // 6
    0x96, // 7
    0xfe, // 8
    0xbe, // 9
];
const COLON: u8 = 0x01;
const BLANK: u8 = 0x00;

/// Something a digit module can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Decimal digit, values above 9 show the last digit
    Digit(u8),
    Colon,
    Blank,
}

impl Glyph {
    pub const fn pattern(self) -> u8 {
        match self {
            Glyph::Digit(digit) => DIGITS[(digit % 10) as usize],
            Glyph::Colon => COLON,
            Glyph::Blank => BLANK,
        }
    }
}

/// Position of a segment in shift-register order, `None` past the last group
pub const fn segment_channel(segment: usize) -> Option<usize> {
    match Output::from_index(segment / CHANNELS_PER_GROUP) {
        Some(output) => Some(output.raw_offset() + segment % CHANNELS_PER_GROUP),
        None => None,
    }
}

/// Normalized channel levels lighting a segment pattern at full brightness.
///
/// The result is in shift-register order, ready for `My9221::data_set`.
pub fn glyph_levels(pattern: u8) -> [f32; CHANNEL_COUNT] {
    let mut levels = [0.0; CHANNEL_COUNT];
    for segment in 0..SEGMENT_COUNT {
        if pattern & (1 << segment) == 0 {
            continue;
        }
        if let Some(channel) = segment_channel(segment) {
            levels[channel] = 1.0;
        }
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Raw positions lit by a pattern
    fn lit(pattern: u8) -> [bool; CHANNEL_COUNT] {
        glyph_levels(pattern).map(|level| level == 1.0)
    }

    fn positions(channels: &[usize]) -> [bool; CHANNEL_COUNT] {
        let mut expected = [false; CHANNEL_COUNT];
        for channel in channels {
            expected[*channel] = true;
        }
        expected
    }

    #[test]
    fn segments_fill_groups_from_out0() {
        // OUT0 sits at the end of the shift order, OUT3 at the start.
        assert_eq!(segment_channel(0), Some(9));
        assert_eq!(segment_channel(2), Some(11));
        assert_eq!(segment_channel(3), Some(6));
        assert_eq!(segment_channel(7), Some(4));
        assert_eq!(segment_channel(11), Some(2));
        assert_eq!(segment_channel(12), None);
    }

    #[test]
    fn colon_is_out0_a() {
        assert_eq!(lit(Glyph::Colon.pattern()), positions(&[9]));
        assert_eq!(lit(Glyph::Blank.pattern()), [false; CHANNEL_COUNT]);
    }

    #[test]
    fn one_lights_b_and_c() {
        // 0x06: bits 1 and 2, OUT0 B and C
        assert_eq!(lit(Glyph::Digit(1).pattern()), positions(&[10, 11]));
    }

    #[test]
    fn eight_lights_every_segment() {
        // 0xfe: everything but the colon, OUT3 stays dark
        assert_eq!(
            lit(Glyph::Digit(8).pattern()),
            positions(&[3, 4, 6, 7, 8, 10, 11])
        );
    }

    #[test]
    fn levels_land_on_the_pattern_outputs() {
        let pattern = Glyph::Digit(4).pattern();
        let raw = glyph_levels(pattern).map(|level| if level == 1.0 { 1 } else { 0 });
        let registers = my9221::OutputRegisters::from_raw(&raw);

        for segment in 0..SEGMENT_COUNT {
            let output = Output::ALL[segment / CHANNELS_PER_GROUP];
            let group = registers.group(output);
            let level = [group.a, group.b, group.c][segment % CHANNELS_PER_GROUP];
            assert_eq!(level == 1, pattern & (1 << segment) != 0, "segment {segment}");
        }
        assert_eq!(*registers.group(Output::Out3), my9221::OutputGroup::default());
    }

    #[test]
    fn digits_are_distinct() {
        for a in 0..10 {
            for b in (a + 1)..10 {
                assert_ne!(Glyph::Digit(a).pattern(), Glyph::Digit(b).pattern());
            }
        }
        assert_eq!(Glyph::Digit(13).pattern(), Glyph::Digit(3).pattern());
    }
}
