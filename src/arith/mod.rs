//! Arithmetic built purely from the gate library.
//!
//! - [`adder`] - half/full adders, the 16-bit ripple-carry adder, increment
//! - [`alu`] - the six-control-signal ALU with zero/negative flags

pub mod adder;
pub mod alu;

pub use adder::{add16, full_adder, half_adder, inc16};
pub use alu::{alu, AluControl, AluOutput, OPERATIONS};
