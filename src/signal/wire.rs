//! A single wire carrying one of two states.
//!
//! `Signal` is the only value that travels through the gate library. Raw
//! host values (`u8`, `char`) enter through the fallible conversions below,
//! which is where anything outside {0, 1} is rejected.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::error::CircuitError;

/// The state of a single wire.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Signal {
    /// Logical 0
    Low = 0,
    /// Logical 1
    High = 1,
}

impl Signal {
    /// Both states in ascending order: Low, High
    pub const ALL: [Signal; 2] = [Signal::Low, Signal::High];

    /// Build a signal from a host boolean.
    #[inline]
    pub const fn from_bool(value: bool) -> Self {
        if value { Signal::High } else { Signal::Low }
    }

    /// Read the signal as a host boolean.
    #[inline]
    pub const fn to_bool(self) -> bool {
        matches!(self, Signal::High)
    }

    /// Read the signal as 0 or 1.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Signal::High)
    }

    #[inline]
    pub const fn is_low(self) -> bool {
        matches!(self, Signal::Low)
    }
}

impl Default for Signal {
    fn default() -> Self {
        Signal::Low
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Low => write!(f, "L"),
            Signal::High => write!(f, "H"),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u8())
    }
}

impl From<bool> for Signal {
    fn from(value: bool) -> Self {
        Signal::from_bool(value)
    }
}

impl From<Signal> for bool {
    fn from(signal: Signal) -> Self {
        signal.to_bool()
    }
}

impl From<Signal> for u8 {
    fn from(signal: Signal) -> Self {
        signal.to_u8()
    }
}

impl TryFrom<u8> for Signal {
    type Error = CircuitError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Signal::Low),
            1 => Ok(Signal::High),
            other => Err(CircuitError::InvalidSignal(other.to_string())),
        }
    }
}

impl TryFrom<char> for Signal {
    type Error = CircuitError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Signal::Low),
            '1' => Ok(Signal::High),
            other => Err(CircuitError::InvalidSignal(format!("'{}'", other))),
        }
    }
}
