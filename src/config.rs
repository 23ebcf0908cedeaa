use my9221::InputPolicy;

pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
    /// Digit modules on the chain, one MY9221 each
    pub digits: u8,
    /// Time between two counter values
    pub step_ms: u64,
    /// Wait between writing the register image and shifting it out.
    /// Keeps the refresh rate below the grayscale update cycle.
    pub refresh_wait_ms: u64,
    /// Settle time between two pin changes on the MY9221 bus
    pub settle_us: u32,
    pub policy: InputPolicy,
}

pub const DISPLAY: DisplayConfig = DisplayConfig {
    digits: 2,
    step_ms: 200,
    refresh_wait_ms: 4,
    settle_us: 1,
    policy: InputPolicy::Permissive,
};

/// Board pins as `(DI, DCKI, heartbeat LED)`
#[macro_export]
macro_rules! display_pins {
    ($p:expr) => {
        ($p.GPIO25, $p.GPIO26, $p.GPIO2)
    };
}
