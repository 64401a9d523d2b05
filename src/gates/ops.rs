//! Operator sugar for signals and buses.
//!
//! `!`, `&`, `|` and `^` are wired to the gate library, so an expression
//! like `a & !b` is still a NAND network underneath.

use std::ops::{BitAnd, BitOr, BitXor, Not};
use crate::gates::{and, and16, not, not16, or, or16, xor};
use crate::signal::{Bus16, Signal};

impl Not for Signal {
    type Output = Signal;

    fn not(self) -> Signal {
        not(self)
    }
}

impl BitAnd for Signal {
    type Output = Signal;

    fn bitand(self, rhs: Signal) -> Signal {
        and(self, rhs)
    }
}

impl BitOr for Signal {
    type Output = Signal;

    fn bitor(self, rhs: Signal) -> Signal {
        or(self, rhs)
    }
}

impl BitXor for Signal {
    type Output = Signal;

    fn bitxor(self, rhs: Signal) -> Signal {
        xor(self, rhs)
    }
}

impl Not for Bus16 {
    type Output = Bus16;

    fn not(self) -> Bus16 {
        not16(self)
    }
}

impl BitAnd for Bus16 {
    type Output = Bus16;

    fn bitand(self, rhs: Bus16) -> Bus16 {
        and16(self, rhs)
    }
}

impl BitOr for Bus16 {
    type Output = Bus16;

    fn bitor(self, rhs: Bus16) -> Bus16 {
        or16(self, rhs)
    }
}
