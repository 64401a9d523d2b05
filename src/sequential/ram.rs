//! Word-addressable memory built as a tree of registers.
//!
//! Each level decodes the top bits of the address: a demultiplexer turns
//! the load signal into one load per child, every child is clocked with the
//! remaining bits, and a multiplexer on the same top bits picks the output.
//!
//! | Block    | Children    | Address bits |
//! |----------|-------------|--------------|
//! | `Ram8`   | 8 registers | 3            |
//! | `Ram64`  | 8 × Ram8    | 3 + 3        |
//! | `Ram512` | 8 × Ram64   | 3 + 6        |
//! | `Ram4K`  | 8 × Ram512  | 3 + 9        |
//! | `Ram16K` | 4 × Ram4K   | 2 + 12       |

use std::array;
use std::fmt;
use log::debug;
use serde::{Serialize, Deserialize};
use crate::error::{CircuitError, Result};
use crate::gates::{dmux4way, dmux8way, mux4way16, mux8way16};
use crate::sequential::Register;
use crate::signal::{Bus16, Signal};

mod sealed {
    use crate::signal::{Bus16, Signal};

    /// A node of the memory tree. The address slice handed to `clock` has
    /// already been checked against `WIDTH` by the root.
    pub trait Node: Default {
        const WIDTH: usize;

        fn clock(&mut self, input: Bus16, load: Signal, address: &[Signal]) -> Bus16;

        fn word_at(&self, index: usize) -> Option<Bus16>;
    }
}

/// A clocked memory block addressed by `ADDRESS_WIDTH` signals.
pub trait MemoryBlock: sealed::Node {
    /// Number of address lines this block consumes.
    const ADDRESS_WIDTH: usize = <Self as sealed::Node>::WIDTH;

    /// Number of words stored.
    const WORDS: usize = 1 << <Self as sealed::Node>::WIDTH;

    /// Clock one edge.
    ///
    /// Returns the addressed word as held before the edge; when `load` is
    /// asserted, `input` is stored at `address` and is visible from the next
    /// cycle on. The address width is checked before anything is clocked.
    fn evaluate(&mut self, input: Bus16, load: Signal, address: &[Signal]) -> Result<Bus16> {
        if address.len() != Self::ADDRESS_WIDTH {
            return Err(CircuitError::WidthMismatch {
                expected: Self::ADDRESS_WIDTH,
                got: address.len(),
            });
        }
        if load.is_high() {
            debug!("store {} at address {}", input, render_address(address));
        }
        Ok(self.clock(input, load, address))
    }

    /// Clock one edge without loading and return the addressed word.
    fn read(&mut self, address: &[Signal]) -> Result<Bus16> {
        self.evaluate(Bus16::ZERO, Signal::Low, address)
    }

    /// Clock one edge that stores `value` at `address`. Returns the word
    /// that was there before.
    fn write(&mut self, value: Bus16, address: &[Signal]) -> Result<Bus16> {
        self.evaluate(value, Signal::High, address)
    }

    /// Inspect the word at a linear index without clocking anything.
    fn peek(&self, index: usize) -> Option<Bus16> {
        self.word_at(index)
    }

    /// List every non-zero word as `(index, word)`.
    fn dump(&self) -> Vec<(usize, Bus16)> {
        (0..Self::WORDS)
            .filter_map(|index| self.word_at(index).map(|word| (index, word)))
            .filter(|(_, word)| *word != Bus16::ZERO)
            .collect()
    }
}

fn render_address(address: &[Signal]) -> String {
    address.iter().map(|s| s.to_string()).collect()
}

// A single register is the leaf of every tree: no address bits of its own.
impl sealed::Node for Register {
    const WIDTH: usize = 0;

    #[inline]
    fn clock(&mut self, input: Bus16, load: Signal, _address: &[Signal]) -> Bus16 {
        self.evaluate(input, load)
    }

    fn word_at(&self, index: usize) -> Option<Bus16> {
        (index == 0).then(|| self.value())
    }
}

// Generate a fixed-arity memory bank decoding `$sel_bits` address lines.
macro_rules! memory_bank {
    ($(#[$meta:meta])* $name:ident, $ways:expr, $sel_bits:expr, $dmux:ident, $mux:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name<C> {
            children: Box<[C; $ways]>,
        }

        impl<C: sealed::Node> $name<C> {
            /// Create a bank with every word zeroed.
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl<C: sealed::Node> Default for $name<C> {
            fn default() -> Self {
                Self {
                    children: Box::new(array::from_fn(|_| C::default())),
                }
            }
        }

        impl<C: sealed::Node> sealed::Node for $name<C> {
            const WIDTH: usize = $sel_bits + C::WIDTH;

            fn clock(&mut self, input: Bus16, load: Signal, address: &[Signal]) -> Bus16 {
                let (top, rest) = address.split_at($sel_bits);
                let sel: [Signal; $sel_bits] = array::from_fn(|i| top[i]);

                // Decode first, then clock every child, then select
                let loads = $dmux(load, sel);

                let mut outputs = [Bus16::ZERO; $ways];
                for ((child, output), child_load) in
                    self.children.iter_mut().zip(outputs.iter_mut()).zip(loads)
                {
                    *output = child.clock(input, child_load, rest);
                }

                $mux(outputs, sel)
            }

            fn word_at(&self, index: usize) -> Option<Bus16> {
                let span = 1usize << C::WIDTH;
                self.children.get(index / span)?.word_at(index % span)
            }
        }

        impl<C: sealed::Node> MemoryBlock for $name<C> {}

        impl<C: sealed::Node> fmt::Debug for $name<C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("words", &Self::WORDS)
                    .field("non_zero_words", &self.dump().len())
                    .finish()
            }
        }

        impl<C: sealed::Node> fmt::Display for $name<C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let digits = Self::WORDS.to_string().len();
                for index in 0..Self::WORDS {
                    if let Some(word) = self.peek(index) {
                        writeln!(f, "{:>width$}: {}", index, word, width = digits)?;
                    }
                }
                Ok(())
            }
        }
    };
}

memory_bank!(
    /// Eight children selected by three address bits.
    Bank8, 8, 3, dmux8way, mux8way16
);

memory_bank!(
    /// Four children selected by two address bits.
    Bank4, 4, 2, dmux4way, mux4way16
);

/// 8 words, 3 address bits.
pub type Ram8 = Bank8<Register>;
/// 64 words, 6 address bits.
pub type Ram64 = Bank8<Ram8>;
/// 512 words, 9 address bits.
pub type Ram512 = Bank8<Ram64>;
/// 4096 words, 12 address bits.
pub type Ram4K = Bank8<Ram512>;
/// 16384 words, 14 address bits.
pub type Ram16K = Bank4<Ram4K>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Address;

    #[test]
    fn test_address_widths() {
        assert_eq!(Ram8::ADDRESS_WIDTH, 3);
        assert_eq!(Ram64::ADDRESS_WIDTH, 6);
        assert_eq!(Ram512::ADDRESS_WIDTH, 9);
        assert_eq!(Ram4K::ADDRESS_WIDTH, 12);
        assert_eq!(Ram16K::ADDRESS_WIDTH, 14);

        assert_eq!(Ram8::WORDS, 8);
        assert_eq!(Ram16K::WORDS, 16384);
    }

    #[test]
    fn test_ram8_write_then_read_next_cycle() {
        let mut ram = Ram8::new();
        let addr = Address::<3>::from_index(5).unwrap();
        let value = Bus16::from_i16(-42);

        // Cycle N: the write reports what was there before
        assert_eq!(ram.write(value, addr.as_slice()).unwrap(), Bus16::ZERO);
        // Cycle N+1: the stored word is visible
        assert_eq!(ram.read(addr.as_slice()).unwrap(), value);
    }

    #[test]
    fn test_ram8_write_isolation() {
        let mut ram = Ram8::new();
        let value = Bus16::from_u16(0xCAFE);
        ram.write(value, Address::<3>::from_index(3).unwrap().as_slice()).unwrap();

        for index in 0..8 {
            let addr = Address::<3>::from_index(index).unwrap();
            let read = ram.read(addr.as_slice()).unwrap();
            if index == 3 {
                assert_eq!(read, value);
            } else {
                assert_eq!(read, Bus16::ZERO, "address {} should be untouched", index);
            }
        }
    }

    #[test]
    fn test_ram8_holds_without_load() {
        let mut ram = Ram8::new();
        let addr = Address::<3>::from_index(1).unwrap();
        ram.write(Bus16::from_u16(7), addr.as_slice()).unwrap();

        // Inputs presented with load low never land
        for _ in 0..5 {
            ram.evaluate(Bus16::ONES, Signal::Low, addr.as_slice()).unwrap();
        }
        assert_eq!(ram.read(addr.as_slice()).unwrap().to_u16(), 7);
    }

    #[test]
    fn test_ram64_every_address() {
        let mut ram = Ram64::new();
        for index in 0..64 {
            let addr = Address::<6>::from_index(index).unwrap();
            ram.write(Bus16::from_u16(index as u16 * 3 + 1), addr.as_slice()).unwrap();
        }
        for index in 0..64 {
            let addr = Address::<6>::from_index(index).unwrap();
            assert_eq!(ram.read(addr.as_slice()).unwrap().to_u16(), index as u16 * 3 + 1);
        }
    }

    #[test]
    fn test_ram512_round_trip() {
        let mut ram = Ram512::new();
        let low = Address::<9>::from_index(0).unwrap();
        let high = Address::<9>::from_index(511).unwrap();
        ram.write(Bus16::from_i16(1), low.as_slice()).unwrap();
        ram.write(Bus16::from_i16(-1), high.as_slice()).unwrap();

        assert_eq!(ram.read(low.as_slice()).unwrap().to_i16(), 1);
        assert_eq!(ram.read(high.as_slice()).unwrap().to_i16(), -1);
        assert_eq!(ram.dump().len(), 2);
    }

    #[test]
    fn test_ram16k_round_trip() {
        let mut ram = Ram16K::new();
        let a = Address::<14>::from_index(0x0123).unwrap();
        let b = Address::<14>::from_index(0x3FFE).unwrap();
        ram.write(Bus16::from_u16(0xAAAA), a.as_slice()).unwrap();
        ram.write(Bus16::from_u16(0x5555), b.as_slice()).unwrap();

        assert_eq!(ram.read(a.as_slice()).unwrap().to_u16(), 0xAAAA);
        assert_eq!(ram.read(b.as_slice()).unwrap().to_u16(), 0x5555);
        assert_eq!(
            ram.dump(),
            vec![(0x0123, Bus16::from_u16(0xAAAA)), (0x3FFE, Bus16::from_u16(0x5555))]
        );
    }

    #[test]
    fn test_wrong_address_width_rejected_before_write() {
        let mut ram = Ram64::new();
        let short = Address::<3>::from_index(2).unwrap();

        assert_eq!(
            ram.write(Bus16::ONES, short.as_slice()),
            Err(CircuitError::WidthMismatch { expected: 6, got: 3 })
        );
        assert!(ram.dump().is_empty(), "no word may change on a rejected call");

        let long = [Signal::High; 7];
        assert!(ram.evaluate(Bus16::ONES, Signal::High, &long).is_err());
        assert!(ram.dump().is_empty());
    }

    #[test]
    fn test_peek_does_not_clock() {
        let mut ram = Ram8::new();
        let addr = Address::<3>::from_index(6).unwrap();
        ram.write(Bus16::from_u16(99), addr.as_slice()).unwrap();

        assert_eq!(ram.peek(6), Some(Bus16::from_u16(99)));
        assert_eq!(ram.peek(0), Some(Bus16::ZERO));
        assert_eq!(ram.peek(8), None);
    }

    #[test]
    fn test_display_lists_every_word() {
        let mut ram = Ram8::new();
        ram.write(Bus16::ONE, Address::<3>::from_index(0).unwrap().as_slice()).unwrap();

        let rendered = ram.to_string();
        assert_eq!(rendered.lines().count(), 8);
        assert_eq!(rendered.lines().next(), Some("0: 0000000000000001"));
    }

    #[test]
    fn test_snapshot_restores_contents() {
        let mut ram = Ram64::new();
        let addr = Address::<6>::from_index(45).unwrap();
        ram.write(Bus16::from_u16(0xBEEF), addr.as_slice()).unwrap();

        let json = serde_json::to_string(&ram).unwrap();
        let mut restored: Ram64 = serde_json::from_str(&json).unwrap();

        assert!(restored == ram);
        assert_eq!(restored.read(addr.as_slice()).unwrap().to_u16(), 0xBEEF);
        assert_eq!(restored.dump(), vec![(45, Bus16::from_u16(0xBEEF))]);
    }

    #[test]
    fn test_snapshot_register() {
        let mut reg = Register::new();
        reg.evaluate(Bus16::from_i16(-2), Signal::High);

        let json = serde_json::to_string(&reg).unwrap();
        let restored: Register = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.value().to_i16(), -2);
    }

    #[test]
    fn test_snapshot_rejects_unknown_signal() {
        assert_eq!(serde_json::from_str::<Signal>("\"High\"").unwrap(), Signal::High);
        assert!(serde_json::from_str::<Signal>("\"Floating\"").is_err());

        let json = serde_json::to_string(&Register::new()).unwrap();
        let tampered = json.replacen("Low", "Floating", 1);
        assert!(serde_json::from_str::<Register>(&tampered).is_err());
    }
}
