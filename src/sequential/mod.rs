//! Clocked components.
//!
//! Every stateful part of the datapath is built on [`Dff`]. Each component
//! exposes an `evaluate` method that clocks exactly one edge and returns its
//! output in the same call:
//! - [`Dff`], [`Bit`] - single-bit storage
//! - [`Register`] - one 16-bit word
//! - [`ram`] - RAM8 through RAM16K
//! - [`ProgramCounter`] - reset/load/increment counter

pub mod latch;
pub mod register;
pub mod ram;
pub mod counter;

pub use latch::{Bit, Dff};
pub use register::Register;
pub use ram::{Bank4, Bank8, MemoryBlock, Ram16K, Ram4K, Ram512, Ram64, Ram8};
pub use counter::ProgramCounter;
