#![no_std]

//! Seven-segment digits on MY9221 modules
//!
//! Each digit module is one MY9221 whose eight lowest channels, `OUT0` A
//! through `OUT2` B, drive the segments. [`CounterDisplay`] renders a [`Counter`] across two modules.

pub mod counter;
pub mod glyph;

pub use counter::{Counter, CounterDisplay, DISPLAY_COMMAND};
pub use glyph::{Glyph, glyph_levels, segment_channel};
