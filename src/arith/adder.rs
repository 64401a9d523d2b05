//! Adders built from the gate library.
//!
//! Provides half and full adders and the 16-bit ripple-carry chain.
//! The carry enters at position 15 (LSB) and ripples toward position 0.

use crate::gates::{and, or, xor};
use crate::signal::{Bus16, Signal};

/// Add two signals, returning (sum, carry).
#[inline]
pub fn half_adder(a: Signal, b: Signal) -> (Signal, Signal) {
    (xor(a, b), and(a, b))
}

/// Add two signals and an incoming carry, returning (sum, carry_out).
#[inline]
pub fn full_adder(a: Signal, b: Signal, carry_in: Signal) -> (Signal, Signal) {
    // First half-adder: a + b
    let (s0, c0) = half_adder(a, b);

    // Second half-adder: s0 + carry_in
    let (sum, c1) = half_adder(s0, carry_in);

    (sum, or(c0, c1))
}

/// Add two 16-bit words modulo 2^16. The final carry is dropped.
pub fn add16(a: Bus16, b: Bus16) -> Bus16 {
    let mut result = Bus16::zero();

    let (sum, mut carry) = half_adder(a[15], b[15]);
    result.set(15, sum);

    for i in (0..15).rev() {
        let (sum, carry_out) = full_adder(a[i], b[i], carry);
        result.set(i, sum);
        carry = carry_out;
    }

    result
}

/// Add one, wrapping at 2^16.
#[inline]
pub fn inc16(a: Bus16) -> Bus16 {
    add16(a, Bus16::ONE)
}
