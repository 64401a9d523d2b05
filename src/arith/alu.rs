//! The arithmetic/logic unit.
//!
//! Six control signals, applied in order (zx, nx, zy, ny, f, no):
//! - zx/zy zero the x/y operand
//! - nx/ny invert the (possibly zeroed) operand
//! - f picks `x & y` (0) or `x + y` (1)
//! - no inverts the result
//!
//! The zero and negative flags are read off the finished output bus.

use std::array;
use std::fmt;
use serde::{Serialize, Deserialize};
use crate::arith::adder::add16;
use crate::error::{CircuitError, Result};
use crate::gates::{and16, mux16, not, not16, or, or8way};
use crate::signal::{Bus16, Signal};

/// The canonical computations and their control codes (zx nx zy ny f no).
pub const OPERATIONS: [(&str, u8); 18] = [
    ("0", 0b101010),
    ("1", 0b111111),
    ("-1", 0b111010),
    ("x", 0b001100),
    ("y", 0b110000),
    ("!x", 0b001101),
    ("!y", 0b110001),
    ("-x", 0b001111),
    ("-y", 0b110011),
    ("x+1", 0b011111),
    ("y+1", 0b110111),
    ("x-1", 0b001110),
    ("y-1", 0b110010),
    ("x+y", 0b000010),
    ("x-y", 0b010011),
    ("y-x", 0b000111),
    ("x&y", 0b000000),
    ("x|y", 0b010101),
];

/// The six ALU control signals.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AluControl {
    /// Zero the x input
    pub zx: Signal,
    /// Negate (invert) the x input
    pub nx: Signal,
    /// Zero the y input
    pub zy: Signal,
    /// Negate (invert) the y input
    pub ny: Signal,
    /// Function select: 0 = AND, 1 = ADD
    pub f: Signal,
    /// Negate (invert) the output
    pub no: Signal,
}

impl AluControl {
    pub const fn from_bits(bits: [Signal; 6]) -> Self {
        let [zx, nx, zy, ny, f, no] = bits;
        Self { zx, nx, zy, ny, f, no }
    }

    pub const fn to_bits(self) -> [Signal; 6] {
        [self.zx, self.nx, self.zy, self.ny, self.f, self.no]
    }

    /// Build from a 6-bit code where bit 5 is zx and bit 0 is no.
    pub const fn from_code(code: u8) -> Self {
        Self {
            zx: Signal::from_bool((code >> 5) & 1 == 1),
            nx: Signal::from_bool((code >> 4) & 1 == 1),
            zy: Signal::from_bool((code >> 3) & 1 == 1),
            ny: Signal::from_bool((code >> 2) & 1 == 1),
            f: Signal::from_bool((code >> 1) & 1 == 1),
            no: Signal::from_bool(code & 1 == 1),
        }
    }

    pub fn to_code(self) -> u8 {
        self.to_bits()
            .iter()
            .fold(0u8, |acc, s| (acc << 1) | s.to_u8())
    }

    /// Parse a string of six `0`/`1` characters in (zx, nx, zy, ny, f, no) order.
    pub fn parse_bits(s: &str) -> Result<Self> {
        let s = s.trim();
        let count = s.chars().count();
        if count != 6 {
            return Err(CircuitError::WidthMismatch { expected: 6, got: count });
        }
        let mut bits = [Signal::Low; 6];
        for (bit, c) in bits.iter_mut().zip(s.chars()) {
            *bit = Signal::try_from(c)?;
        }
        Ok(Self::from_bits(bits))
    }

    /// Look up a canonical computation such as `x+y` or `!x`.
    pub fn from_mnemonic(mnemonic: &str) -> Result<Self> {
        let wanted: String = mnemonic.chars().filter(|c| !c.is_whitespace()).collect();
        OPERATIONS
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|&(_, code)| Self::from_code(code))
            .ok_or_else(|| CircuitError::UnknownAluOperation(mnemonic.to_string()))
    }

    /// The canonical name for this control word, if it has one.
    pub fn mnemonic(self) -> Option<&'static str> {
        let code = self.to_code();
        OPERATIONS
            .iter()
            .find(|&&(_, c)| c == code)
            .map(|&(name, _)| name)
    }
}

impl fmt::Debug for AluControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AluControl({}", self)?;
        if let Some(name) = self.mnemonic() {
            write!(f, " = {}", name)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for AluControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.to_bits() {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// ALU result with its status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AluOutput {
    pub out: Bus16,
    /// 1 when every output bit is 0
    pub zr: Signal,
    /// The output's sign bit
    pub ng: Signal,
}

pub fn alu(x: Bus16, y: Bus16, control: AluControl) -> AluOutput {
    let mid_x = mux16(x, Bus16::ZERO, control.zx);
    let end_x = mux16(mid_x, not16(mid_x), control.nx);

    let mid_y = mux16(y, Bus16::ZERO, control.zy);
    let end_y = mux16(mid_y, not16(mid_y), control.ny);

    let mid_out = mux16(and16(end_x, end_y), add16(end_x, end_y), control.f);
    let out = mux16(mid_out, not16(mid_out), control.no);

    let high_byte: [Signal; 8] = array::from_fn(|i| out[i]);
    let low_byte: [Signal; 8] = array::from_fn(|i| out[i + 8]);
    let zr = not(or(or8way(low_byte), or8way(high_byte)));
    let ng = out[0];

    AluOutput { out, zr, ng }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(op: &str, x: i16, y: i16) -> AluOutput {
        let control = AluControl::from_mnemonic(op).unwrap();
        alu(Bus16::from_i16(x), Bus16::from_i16(y), control)
    }

    #[test]
    fn test_canonical_operations() {
        let (x, y) = (17i16, 5i16);
        let expected: [(&str, i16); 18] = [
            ("0", 0),
            ("1", 1),
            ("-1", -1),
            ("x", x),
            ("y", y),
            ("!x", !x),
            ("!y", !y),
            ("-x", -x),
            ("-y", -y),
            ("x+1", x + 1),
            ("y+1", y + 1),
            ("x-1", x - 1),
            ("y-1", y - 1),
            ("x+y", x + y),
            ("x-y", x - y),
            ("y-x", y - x),
            ("x&y", x & y),
            ("x|y", x | y),
        ];
        for (op, want) in expected {
            assert_eq!(run(op, x, y).out.to_i16(), want, "operation {}", op);
        }
    }

    #[test]
    fn test_wrapping_arithmetic() {
        assert_eq!(run("x+y", i16::MAX, 1).out.to_i16(), i16::MIN);
        assert_eq!(run("x-y", i16::MIN, 1).out.to_i16(), i16::MAX);
        assert_eq!(run("-x", i16::MIN, 0).out.to_i16(), i16::MIN);
    }

    #[test]
    fn test_zero_flag() {
        let zero = run("0", 1234, -77);
        assert_eq!(zero.out, Bus16::ZERO);
        assert_eq!(zero.zr, Signal::High);
        assert_eq!(zero.ng, Signal::Low);

        // Every single set bit clears the flag
        for i in 0..16 {
            let mut x = Bus16::ZERO;
            x.set(i, Signal::High);
            let result = alu(x, Bus16::ZERO, AluControl::from_mnemonic("x").unwrap());
            assert_eq!(result.out, x);
            assert_eq!(result.zr, Signal::Low, "bit {} set", i);
        }
    }

    #[test]
    fn test_negative_flag() {
        assert_eq!(run("-1", 0, 0).ng, Signal::High);
        assert_eq!(run("1", 0, 0).ng, Signal::Low);
        assert_eq!(run("x-y", 3, 10).ng, Signal::High);
    }

    #[test]
    fn test_control_codes() {
        let control = AluControl::parse_bits("000010").unwrap();
        assert_eq!(control.f, Signal::High);
        assert_eq!(control.mnemonic(), Some("x+y"));
        assert_eq!(control.to_string(), "000010");

        for (name, code) in OPERATIONS {
            let control = AluControl::from_code(code);
            assert_eq!(control.to_code(), code);
            assert_eq!(control.mnemonic(), Some(name));
            assert_eq!(AluControl::from_bits(control.to_bits()), control);
        }
    }

    #[test]
    fn test_control_errors() {
        assert_eq!(
            AluControl::from_mnemonic("x*y"),
            Err(CircuitError::UnknownAluOperation("x*y".into()))
        );
        assert!(matches!(
            AluControl::parse_bits("0101"),
            Err(CircuitError::WidthMismatch { expected: 6, got: 4 })
        ));
        assert!(matches!(
            AluControl::parse_bits("01010a"),
            Err(CircuitError::InvalidSignal(_))
        ));
    }

    #[test]
    fn test_mnemonic_ignores_spaces() {
        assert_eq!(
            AluControl::from_mnemonic(" x + y ").unwrap(),
            AluControl::from_mnemonic("x+y").unwrap()
        );
    }
}
