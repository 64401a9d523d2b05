//! Multi-way selectors and decoders.
//!
//! Selector arrays are MSB first. The reduction trees consume the last
//! selector bit first and selector position 0 last, so candidate `k` is
//! chosen when the selector spells `k` in binary.

use crate::gates::logic::{and, dmux, not, or};
use crate::gates::wide::mux16;
use crate::signal::{Bus16, Signal};

/// OR across eight signals.
pub fn or8way(inp: [Signal; 8]) -> Signal {
    inp.iter().skip(1).fold(inp[0], |acc, &s| or(s, acc))
}

/// Select one of four buses.
pub fn mux4way16(inputs: [Bus16; 4], sel: [Signal; 2]) -> Bus16 {
    let [a, b, c, d] = inputs;

    let a_or_b = mux16(a, b, sel[1]);
    let c_or_d = mux16(c, d, sel[1]);

    mux16(a_or_b, c_or_d, sel[0])
}

/// Select one of eight buses.
pub fn mux8way16(inputs: [Bus16; 8], sel: [Signal; 3]) -> Bus16 {
    let [a, b, c, d, e, f, g, h] = inputs;

    let a_or_b = mux16(a, b, sel[2]);
    let c_or_d = mux16(c, d, sel[2]);
    let e_or_f = mux16(e, f, sel[2]);
    let g_or_h = mux16(g, h, sel[2]);

    let low_half = mux16(a_or_b, c_or_d, sel[1]);
    let high_half = mux16(e_or_f, g_or_h, sel[1]);

    mux16(low_half, high_half, sel[0])
}

/// Route `inp` onto one of four outputs; the rest are 0.
pub fn dmux4way(inp: Signal, sel: [Signal; 2]) -> [Signal; 4] {
    let (y, z) = dmux(inp, sel[1]);
    let low = not(sel[0]);

    [and(low, y), and(low, z), and(sel[0], y), and(sel[0], z)]
}

/// Route `inp` onto one of eight outputs; the rest are 0.
pub fn dmux8way(inp: Signal, sel: [Signal; 3]) -> [Signal; 8] {
    let [w, x, y, z] = dmux4way(inp, [sel[1], sel[2]]);
    let low = not(sel[0]);

    [
        and(low, w),
        and(low, x),
        and(low, y),
        and(low, z),
        and(sel[0], w),
        and(sel[0], x),
        and(sel[0], y),
        and(sel[0], z),
    ]
}
