//! Infrastructure layer
//!
//! Board specific wiring of the segment display: GPIO pins, the MY9221 driver
//! and the task that drives it.

pub mod drivers;
pub mod tasks;
pub mod types;
