//! # nand16
//!
//! A 16-bit computer datapath simulated from first principles.
//!
//! Everything starts from a single NAND gate. On top of it the crate wires
//! the usual combinational library, a ripple-carry adder and ALU, clocked
//! storage, RAM blocks from 8 to 16K words, and a program counter.

pub mod error;
pub mod signal;
pub mod gates;
pub mod arith;
pub mod sequential;

// Re-export commonly used types
pub use error::{CircuitError, Result};
pub use signal::{Address, Bus16, Signal};
pub use arith::{alu, AluControl, AluOutput};
pub use sequential::{
    Bit, Dff, MemoryBlock, ProgramCounter, Ram16K, Ram4K, Ram512, Ram64, Ram8, Register,
};
