//! Error types for the MY9221 driver

use core::fmt;

use embedded_hal::digital::ErrorKind;

/// Error type for driver operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A data or clock pin write failed
    Pin(ErrorKind),
    /// Chain length outside `1..=MAX_CHAIN_LEN`
    InvalidChainLength(u8),
    /// IC index outside `1..=chain_len` (strict policy only)
    IcIndexOutOfRange(u8),
    /// Normalized value outside `[0.0, 1.0]` or NaN (strict policy only)
    ValueOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin(kind) => write!(f, "pin error: {}", kind),
            Error::InvalidChainLength(len) => write!(f, "invalid chain length: {}", len),
            Error::IcIndexOutOfRange(ic) => write!(f, "IC index out of range: {}", ic),
            Error::ValueOutOfRange => write!(f, "normalized value out of range"),
        }
    }
}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::Pin(kind) => *kind,
            _ => ErrorKind::Other,
        }
    }
}
