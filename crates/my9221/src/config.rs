//! Driver configuration

/// Largest chain the driver preallocates registers for
pub const MAX_CHAIN_LEN: usize = 10;

/// Default settle time between two pin changes (1 µs)
pub const DEFAULT_SETTLE_NS: u32 = 1_000;

/// How out-of-range caller input is treated
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputPolicy {
    /// Reference behaviour: an IC index outside `1..=chain_len` is redirected to
    /// the first IC, and normalized values outside `[0.0, 1.0]` are scaled as is.
    #[default]
    Permissive,
    /// Reject out-of-range IC indexes and normalized values with an error.
    Strict,
}

/// Bus timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Minimum time between two pin state changes, in nanoseconds.
    /// Must cover the IC's minimum clock and data pulse width.
    pub settle_ns: u32,
}

impl Timing {
    pub const fn from_nanos(settle_ns: u32) -> Self {
        Self { settle_ns }
    }

    pub const fn from_micros(settle_us: u32) -> Self {
        Self {
            settle_ns: settle_us.saturating_mul(1_000),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::from_nanos(DEFAULT_SETTLE_NS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Number of cascaded ICs, `1..=MAX_CHAIN_LEN`
    pub chain_len: u8,
    pub timing: Timing,
    pub policy: InputPolicy,
}

impl DriverConfig {
    pub const fn new(chain_len: u8) -> Self {
        Self {
            chain_len,
            timing: Timing::from_nanos(DEFAULT_SETTLE_NS),
            policy: InputPolicy::Permissive,
        }
    }

    pub const fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub const fn with_policy(mut self, policy: InputPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
