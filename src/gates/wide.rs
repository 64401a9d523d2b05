//! 16-wide elementwise gates.
//!
//! Output position `i` depends on input position `i` only.

use std::array;
use crate::gates::logic::{and, mux, not, or};
use crate::signal::{Bus16, Signal};

/// Invert every position.
pub fn not16(a: Bus16) -> Bus16 {
    Bus16::from_signals(array::from_fn(|i| not(a[i])))
}

/// Positionwise AND.
pub fn and16(a: Bus16, b: Bus16) -> Bus16 {
    Bus16::from_signals(array::from_fn(|i| and(a[i], b[i])))
}

/// Positionwise OR.
pub fn or16(a: Bus16, b: Bus16) -> Bus16 {
    Bus16::from_signals(array::from_fn(|i| or(a[i], b[i])))
}

/// `sel` is broadcast to all sixteen positions.
pub fn mux16(a: Bus16, b: Bus16, sel: Signal) -> Bus16 {
    Bus16::from_signals(array::from_fn(|i| mux(a[i], b[i], sel)))
}
