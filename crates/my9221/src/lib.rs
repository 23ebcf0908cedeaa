#![no_std]

//! MY9221 12-channel LED driver
//!
//! Bit-banged driver for daisy-chained MY9221 ICs over the two-wire DI/DCKI
//! interface.
//!
//! Modules:
//! - `bus` - Word shifting and latch sequences on the raw pins
//! - `command` - Command register fields and bit packing
//! - `registers` - Per-IC grayscale registers and their shift order
//! - `driver` - Chain register image and refresh
//! - `config` - Chain length, timing and input policy
//!
//! The driver is generic over `embedded-hal` output pins and delay. Timing
//! critical sequences run inside `critical_section::with`, so the platform must
//! provide a critical-section implementation. On the host the `mock` feature
//! provides one.

pub mod bus;
pub mod command;
pub mod config;
mod driver;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod registers;

pub use bus::Bus;
pub use command::{
    BitDepth, ClockSource, Command, CommandFields, CounterReset, OscillatorDivider, Polarity,
    ShotMode, SlewRate, Waveform,
};
pub use config::{DriverConfig, InputPolicy, MAX_CHAIN_LEN, Timing};
pub use driver::My9221;
pub use error::Error;
pub use registers::{CHANNEL_COUNT, Output, OutputGroup, OutputRegisters};
