//! Host-side scenarios across the driver and the segment display.

#[cfg(test)]
mod counter_sweep;
