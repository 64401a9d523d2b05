//! Two-state signals and the buses built from them.
//!
//! This module provides the core value types of the datapath:
//! - [`Signal`] - A single wire (0 or 1)
//! - [`Bus16`] - A 16-signal data word
//! - [`Address`] - An N-signal address bus

mod wire;
mod bus;

pub use wire::Signal;
pub use bus::{Address, Bus16};
