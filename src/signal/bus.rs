//! Fixed-width groups of signals.
//!
//! This module provides the two bus shapes used by the datapath:
//! - `Bus16`: one 16-bit data word
//! - `Address<N>`: an `N`-bit address bus for a memory block
//!
//! Both store position 0 as the most significant bit. The integer
//! conversions here are for callers and test harnesses only; no gate ever
//! looks at a bus as an integer.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::error::{CircuitError, Result};
use crate::signal::Signal;

/// A 16-bit data bus.
///
/// Value range as unsigned: 0 to 65,535; as two's complement: -32,768 to +32,767
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bus16 {
    /// Signals stored from most significant (index 0) to least significant (index 15)
    signals: [Signal; 16],
}

// ============================================================================
// Bus16 Implementation
// ============================================================================

impl Bus16 {
    /// Number of signals on the bus.
    pub const WIDTH: usize = 16;

    /// All sixteen lines low.
    pub const ZERO: Bus16 = Bus16 { signals: [Signal::Low; 16] };

    /// The constant `0…01`, used by the incrementer.
    pub const ONE: Bus16 = {
        let mut signals = [Signal::Low; 16];
        signals[15] = Signal::High;
        Bus16 { signals }
    };

    /// All sixteen lines high (-1 in two's complement).
    pub const ONES: Bus16 = Bus16 { signals: [Signal::High; 16] };

    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Create a bus from an array of signals (MSB first).
    #[inline]
    pub const fn from_signals(signals: [Signal; 16]) -> Self {
        Self { signals }
    }

    /// Get the underlying signal array.
    #[inline]
    pub const fn signals(&self) -> &[Signal; 16] {
        &self.signals
    }

    /// Get a single signal by position (0 = MSB).
    #[inline]
    pub const fn get(&self, index: usize) -> Signal {
        self.signals[index]
    }

    /// Set a single signal by position (0 = MSB).
    #[inline]
    pub fn set(&mut self, index: usize, signal: Signal) {
        self.signals[index] = signal;
    }

    /// The sign bit under the MSB-first convention.
    #[inline]
    pub const fn msb(&self) -> Signal {
        self.signals[0]
    }

    /// Build a bus from a slice, which must hold exactly 16 signals.
    pub fn from_slice(signals: &[Signal]) -> Result<Self> {
        let signals: [Signal; 16] = signals
            .try_into()
            .map_err(|_| CircuitError::WidthMismatch { expected: Self::WIDTH, got: signals.len() })?;
        Ok(Self { signals })
    }

    /// Create from host booleans, MSB first.
    pub fn from_bools(bits: [bool; 16]) -> Self {
        Self { signals: bits.map(Signal::from_bool) }
    }

    /// Convert to host booleans, MSB first.
    pub fn to_bools(&self) -> [bool; 16] {
        self.signals.map(Signal::to_bool)
    }

    /// Create from an unsigned integer.
    pub fn from_u16(value: u16) -> Self {
        let mut signals = [Signal::Low; 16];
        for (i, signal) in signals.iter_mut().enumerate() {
            *signal = Signal::from_bool((value >> (15 - i)) & 1 == 1);
        }
        Self { signals }
    }

    /// Convert to an unsigned integer.
    pub fn to_u16(&self) -> u16 {
        self.signals
            .iter()
            .fold(0u16, |acc, s| (acc << 1) | u16::from(s.to_u8()))
    }

    /// Create from a two's-complement integer.
    pub fn from_i16(value: i16) -> Self {
        Self::from_u16(value as u16)
    }

    /// Convert to a two's-complement integer.
    pub fn to_i16(&self) -> i16 {
        self.to_u16() as i16
    }

    /// Iterate the signals from MSB to LSB.
    pub fn iter(&self) -> impl Iterator<Item = Signal> + '_ {
        self.signals.iter().copied()
    }

    /// Parse from a string like "0b0000_0000_0000_0101" (MSB first).
    pub fn parse(s: &str) -> Result<Self> {
        let signals = parse_signals(s)?;
        Self::from_slice(&signals)
    }
}

impl Default for Bus16 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Index<usize> for Bus16 {
    type Output = Signal;

    fn index(&self, index: usize) -> &Signal {
        &self.signals[index]
    }
}

impl TryFrom<&[Signal]> for Bus16 {
    type Error = CircuitError;

    fn try_from(signals: &[Signal]) -> Result<Self> {
        Self::from_slice(signals)
    }
}

impl TryFrom<&[u8]> for Bus16 {
    type Error = CircuitError;

    fn try_from(raw: &[u8]) -> Result<Self> {
        if raw.len() != Self::WIDTH {
            return Err(CircuitError::WidthMismatch { expected: Self::WIDTH, got: raw.len() });
        }
        let mut signals = [Signal::Low; 16];
        for (signal, &value) in signals.iter_mut().zip(raw) {
            *signal = Signal::try_from(value)?;
        }
        Ok(Self { signals })
    }
}

impl From<[Signal; 16]> for Bus16 {
    fn from(signals: [Signal; 16]) -> Self {
        Self::from_signals(signals)
    }
}

impl FromStr for Bus16 {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Debug for Bus16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bus16(0b")?;
        for (i, signal) in self.signals.iter().enumerate() {
            if i > 0 && i % 4 == 0 {
                write!(f, "_")?;
            }
            write!(f, "{}", signal)?;
        }
        write!(f, " = {})", self.to_i16())
    }
}

impl fmt::Display for Bus16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for signal in &self.signals {
            write!(f, "{}", signal)?;
        }
        Ok(())
    }
}

// ============================================================================
// Address Implementation
// ============================================================================

/// An `N`-bit address bus (position 0 = MSB).
///
/// Memory blocks check the width of the address they are handed against
/// their own decode depth before evaluating anything.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address<const N: usize> {
    signals: [Signal; N],
}

impl<const N: usize> Address<N> {
    /// Number of address lines.
    pub const WIDTH: usize = N;

    /// Number of distinct addresses.
    pub const SPAN: usize = 1 << N;

    /// Wrap an array of address lines.
    #[inline]
    pub const fn from_signals(signals: [Signal; N]) -> Self {
        Self { signals }
    }

    pub fn from_slice(signals: &[Signal]) -> Result<Self> {
        let signals: [Signal; N] = signals
            .try_into()
            .map_err(|_| CircuitError::WidthMismatch { expected: N, got: signals.len() })?;
        Ok(Self { signals })
    }

    /// Encode a linear index, MSB first.
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::SPAN {
            return Err(CircuitError::AddressOutOfRange { index, width: N });
        }
        let mut signals = [Signal::Low; N];
        for (i, signal) in signals.iter_mut().enumerate() {
            *signal = Signal::from_bool((index >> (N - 1 - i)) & 1 == 1);
        }
        Ok(Self { signals })
    }

    pub fn to_index(&self) -> usize {
        self.signals
            .iter()
            .fold(0usize, |acc, s| (acc << 1) | usize::from(s.to_u8()))
    }

    #[inline]
    pub fn as_slice(&self) -> &[Signal] {
        &self.signals
    }

    pub fn parse(s: &str) -> Result<Self> {
        let signals = parse_signals(s)?;
        Self::from_slice(&signals)
    }
}

impl<const N: usize> Default for Address<N> {
    fn default() -> Self {
        Self { signals: [Signal::Low; N] }
    }
}

impl<const N: usize> AsRef<[Signal]> for Address<N> {
    fn as_ref(&self) -> &[Signal] {
        &self.signals
    }
}

impl<const N: usize> FromStr for Address<N> {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<const N: usize> fmt::Debug for Address<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address<{}>({} = {})", N, self, self.to_index())
    }
}

impl<const N: usize> fmt::Display for Address<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for signal in &self.signals {
            write!(f, "{}", signal)?;
        }
        Ok(())
    }
}

/// Split a bit string into signals, accepting an optional `0b` prefix and `_` separators.
fn parse_signals(s: &str) -> Result<Vec<Signal>> {
    let s = s.trim();
    let s = s.strip_prefix("0b").unwrap_or(s);
    if s.is_empty() {
        return Err(CircuitError::ParseBus("empty input".into()));
    }
    s.chars()
        .filter(|&c| c != '_')
        .map(Signal::try_from)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
