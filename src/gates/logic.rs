//! Single-signal gates.
//!
//! `nand` is the axiom: the only gate written directly against signal
//! values. Every other gate below is wired from `nand` and the gates defined
//! before it, so each result reduces to a tree of NAND evaluations.

use crate::signal::Signal;

/// The primitive gate: 0 only when both inputs are 1.
#[inline]
pub fn nand(a: Signal, b: Signal) -> Signal {
    match (a, b) {
        (Signal::High, Signal::High) => Signal::Low,
        _ => Signal::High,
    }
}

#[inline]
pub fn not(a: Signal) -> Signal {
    nand(a, a)
}

#[inline]
pub fn and(a: Signal, b: Signal) -> Signal {
    not(nand(a, b))
}

#[inline]
pub fn or(a: Signal, b: Signal) -> Signal {
    nand(not(a), not(b))
}

#[inline]
pub fn xor(a: Signal, b: Signal) -> Signal {
    or(and(a, not(b)), and(not(a), b))
}

/// 2-way selector: `a` when `sel` is 0, `b` when `sel` is 1.
#[inline]
pub fn mux(a: Signal, b: Signal, sel: Signal) -> Signal {
    or(and(not(sel), a), and(sel, b))
}

/// 2-way router: returns `(a, b)` with `inp` on `a` when `sel` is 0 and on
/// `b` when `sel` is 1. The unselected output is 0.
#[inline]
pub fn dmux(inp: Signal, sel: Signal) -> (Signal, Signal) {
    let a = and(xor(inp, sel), not(sel));
    let b = and(inp, sel);
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal::{High as H, Low as L};

    #[test]
    fn test_nand_truth_table() {
        assert_eq!(nand(L, L), H);
        assert_eq!(nand(L, H), H);
        assert_eq!(nand(H, L), H);
        assert_eq!(nand(H, H), L);
    }

    #[test]
    fn test_not() {
        assert_eq!(not(L), H);
        assert_eq!(not(H), L);
    }

    #[test]
    fn test_and_or_tables() {
        let rows = [(L, L, L, L), (L, H, L, H), (H, L, L, H), (H, H, H, H)];
        for (a, b, and_out, or_out) in rows {
            assert_eq!(and(a, b), and_out, "and({:?}, {:?})", a, b);
            assert_eq!(or(a, b), or_out, "or({:?}, {:?})", a, b);
        }
    }

    #[test]
    fn test_xor_truth_table() {
        assert_eq!(xor(L, L), L);
        assert_eq!(xor(L, H), H);
        assert_eq!(xor(H, L), H);
        assert_eq!(xor(H, H), L);
    }

    #[test]
    fn test_mux_selects() {
        for a in Signal::ALL {
            for b in Signal::ALL {
                assert_eq!(mux(a, b, L), a, "mux({:?}, {:?}, 0)", a, b);
                assert_eq!(mux(a, b, H), b, "mux({:?}, {:?}, 1)", a, b);
            }
        }
    }

    #[test]
    fn test_dmux_routes() {
        assert_eq!(dmux(L, L), (L, L));
        assert_eq!(dmux(L, H), (L, L));
        assert_eq!(dmux(H, L), (H, L));
        assert_eq!(dmux(H, H), (L, H));
    }
}
