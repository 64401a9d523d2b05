//! Single-bit storage.
//!
//! [`Dff`] is the only place in the simulator that holds state. Every
//! evaluation hands back what was captured on the previous edge and then
//! captures the new input. [`Bit`] gates that capture behind a load signal.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::gates::mux;
use crate::signal::Signal;

/// Data flip-flop with a one-cycle delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dff {
    q: Signal,
}

impl Dff {
    /// Create a flip-flop holding 0.
    pub const fn new() -> Self {
        Self { q: Signal::Low }
    }

    /// Clock one edge: returns the previous capture, then stores `inp`.
    #[inline]
    pub fn evaluate(&mut self, inp: Signal) -> Signal {
        let last_q = self.q;
        self.q = inp;
        last_q
    }

    /// The currently captured value.
    #[inline]
    pub const fn value(&self) -> Signal {
        self.q
    }
}

/// A 1-bit register: keeps its value unless `load` is asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bit {
    dff: Dff,
}

impl Bit {
    pub const fn new() -> Self {
        Self { dff: Dff::new() }
    }

    /// Clock one edge. Returns the value held before the edge.
    #[inline]
    pub fn evaluate(&mut self, inp: Signal, load: Signal) -> Signal {
        let which = mux(self.dff.value(), inp, load);
        self.dff.evaluate(which)
    }

    #[inline]
    pub const fn value(&self) -> Signal {
        self.dff.value()
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
