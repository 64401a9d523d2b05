//! A 16-bit word register.

use std::array;
use std::fmt;
use serde::{Serialize, Deserialize};
use crate::sequential::latch::Bit;
use crate::signal::{Bus16, Signal};

/// Sixteen gated bits sharing one load signal.
///
/// `bits[i]` stores bus position `i`, so position 0 is still the MSB.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Register {
    bits: [Bit; 16],
}

impl Register {
    /// Create a register holding 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock one edge. Returns the word held before the edge.
    pub fn evaluate(&mut self, inp: Bus16, load: Signal) -> Bus16 {
        Bus16::from_signals(array::from_fn(|i| self.bits[i].evaluate(inp[i], load)))
    }

    /// The currently held word.
    pub fn value(&self) -> Bus16 {
        Bus16::from_signals(array::from_fn(|i| self.bits[i].value()))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
