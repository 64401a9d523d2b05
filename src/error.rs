//! Error types shared by every layer of the simulator.

use thiserror::Error;

/// Errors raised when a value cannot be carried on a wire or bus.
///
/// Every variant is fatal to the single evaluation call that raised it.
/// Width checks always happen before any storage cell is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    /// A raw value outside the two-valued signal domain.
    #[error("invalid signal value {0} (expected 0 or 1)")]
    InvalidSignal(String),

    /// A bus or address of the wrong length.
    #[error("width mismatch: expected {expected} signals, got {got}")]
    WidthMismatch { expected: usize, got: usize },

    /// An integer index that needs more address bits than are available.
    #[error("address {index} does not fit in {width} bits")]
    AddressOutOfRange { index: usize, width: usize },

    /// An ALU mnemonic that names none of the canonical computations.
    #[error("unknown ALU operation: '{0}'")]
    UnknownAluOperation(String),

    /// A bus string that could not be parsed.
    #[error("cannot parse bus: {0}")]
    ParseBus(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CircuitError>;
