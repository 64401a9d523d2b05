//! Combinational gate library.
//!
//! Everything here is a pure function of its inputs:
//! - [`logic`] - NAND and the single-signal gates derived from it
//! - [`wide`] - 16-wide elementwise variants
//! - [`multiway`] - OR reduction, multi-way multiplexers and demultiplexers

pub mod logic;
pub mod wide;
pub mod multiway;
mod ops;

pub use logic::{and, dmux, mux, nand, not, or, xor};
pub use wide::{and16, mux16, not16, or16};
pub use multiway::{dmux4way, dmux8way, mux4way16, mux8way16, or8way};
