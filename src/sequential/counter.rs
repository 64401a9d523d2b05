//! The program counter.
//!
//! Next-state priority, highest first:
//!
//! | reset | load | inc | next value   |
//! |-------|------|-----|--------------|
//! | 1     | *    | *   | 0            |
//! | 0     | 1    | *   | input        |
//! | 0     | 0    | 1   | current + 1  |
//! | 0     | 0    | 0   | current      |
//!
//! The table is realised with one 8-way multiplexer keyed on
//! `(reset, inc, load)`, with reset in the most significant position.

use std::fmt;
use log::{debug, trace};
use serde::{Serialize, Deserialize};
use crate::arith::inc16;
use crate::gates::mux8way16;
use crate::sequential::Register;
use crate::signal::{Bus16, Signal};

/// A 16-bit counter with reset, load and increment controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgramCounter {
    reg: Register,
}

impl ProgramCounter {
    /// Create a counter at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock one edge and return the value the counter now holds.
    ///
    /// The register is always loaded; the selection logic alone decides
    /// whether that load changes anything.
    pub fn evaluate(&mut self, input: Bus16, load: Signal, inc: Signal, reset: Signal) -> Bus16 {
        let current = self.reg.value();
        let next = inc16(current);
        let zero = Bus16::ZERO;

        let selected = mux8way16(
            [current, input, next, input, zero, zero, zero, zero],
            [reset, inc, load],
        );

        if reset.is_high() {
            debug!("program counter reset");
        } else if load.is_high() {
            debug!("program counter loaded {}", input.to_u16());
        }

        self.reg.evaluate(selected, Signal::High);
        trace!("program counter = {}", selected.to_u16());
        selected
    }

    /// Count up by one.
    pub fn increment(&mut self) -> Bus16 {
        self.evaluate(Bus16::ZERO, Signal::Low, Signal::High, Signal::Low)
    }

    /// Jump to `target`.
    pub fn jump(&mut self, target: Bus16) -> Bus16 {
        self.evaluate(target, Signal::High, Signal::Low, Signal::Low)
    }

    /// Return to 0.
    pub fn reset(&mut self) -> Bus16 {
        self.evaluate(Bus16::ZERO, Signal::Low, Signal::Low, Signal::High)
    }

    /// The currently held address. Does not clock the counter.
    pub fn value(&self) -> Bus16 {
        self.reg.value()
    }
}

impl fmt::Display for ProgramCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal::{High as H, Low as L};

    #[test]
    fn test_counts_up_from_zero() {
        let mut pc = ProgramCounter::new();
        assert_eq!(pc.value(), Bus16::ZERO);

        for expected in 1..=10u16 {
            let out = pc.evaluate(Bus16::ZERO, L, H, L);
            assert_eq!(out.to_u16(), expected);
            assert_eq!(pc.value().to_u16(), expected);
        }
    }

    #[test]
    fn test_reset_has_top_priority() {
        let mut pc = ProgramCounter::new();
        for _ in 0..10 {
            pc.increment();
        }
        let out = pc.evaluate(Bus16::from_u16(0x1234), H, H, H);
        assert_eq!(out, Bus16::ZERO);
        assert_eq!(pc.value(), Bus16::ZERO);
    }

    #[test]
    fn test_load_beats_increment() {
        let mut pc = ProgramCounter::new();
        let target = Bus16::from_u16(500);
        assert_eq!(pc.evaluate(target, H, H, L), target);
        assert_eq!(pc.increment().to_u16(), 501);
    }

    #[test]
    fn test_hold_keeps_value() {
        let mut pc = ProgramCounter::new();
        pc.jump(Bus16::from_u16(77));
        for _ in 0..3 {
            assert_eq!(pc.evaluate(Bus16::ONES, L, L, L).to_u16(), 77);
        }
    }

    #[test]
    fn test_increment_wraps() {
        let mut pc = ProgramCounter::new();
        pc.jump(Bus16::ONES);
        assert_eq!(pc.increment(), Bus16::ZERO);
    }

    #[test]
    fn test_reset_helper() {
        let mut pc = ProgramCounter::new();
        pc.jump(Bus16::from_u16(9));
        assert_eq!(pc.reset(), Bus16::ZERO);
        assert_eq!(pc.to_string(), "0000000000000000");
    }

    #[test]
    fn test_snapshot_keeps_counting() {
        let mut pc = ProgramCounter::new();
        pc.jump(Bus16::from_u16(7));

        let json = serde_json::to_string(&pc).unwrap();
        let mut restored: ProgramCounter = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, pc);
        assert_eq!(restored.increment().to_u16(), 8);
        assert_eq!(pc.value().to_u16(), 7);
    }
}
