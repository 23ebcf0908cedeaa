mod segment_bus;

pub use segment_bus::{init_heartbeat, init_segment_driver};
