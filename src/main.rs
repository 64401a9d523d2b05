//! nand16 - CLI Entry Point
//!
//! Commands:
//! - `nand16 gates` - Print truth tables for the single-bit gates
//! - `nand16 alu <x> <y>` - Evaluate the ALU
//! - `nand16 count <cycles>` - Drive the program counter
//! - `nand16 memory --write ADDR=VALUE` - Write and read back a RAM block
//! - `nand16 test` - Built-in self-test

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "nand16")]
#[command(version = "0.1.0")]
#[command(about = "A 16-bit datapath simulator built up from a single NAND gate")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print truth tables for the single-bit gates
    Gates,
    /// Evaluate the ALU on two signed 16-bit operands
    Alu {
        /// The x operand
        #[arg(allow_negative_numbers = true)]
        x: i16,
        /// The y operand
        #[arg(allow_negative_numbers = true)]
        y: i16,
        /// Computation mnemonic (e.g. x+y, x-1, !x, x&y)
        #[arg(short, long, default_value = "x+y")]
        op: String,
        /// Raw control bits zx nx zy ny f no (overrides --op)
        #[arg(short, long)]
        control: Option<String>,
    },
    /// Clock the program counter with increment held high
    Count {
        /// Number of cycles to run
        cycles: u32,
        /// Value to load into the counter
        #[arg(short, long)]
        load: Option<u16>,
        /// Cycle on which --load is applied
        #[arg(long, default_value = "0")]
        at: u32,
        /// Cycle on which reset is asserted
        #[arg(long)]
        reset_at: Option<u32>,
        /// Print the counter after every cycle
        #[arg(short, long)]
        trace: bool,
    },
    /// Write words into a RAM block, one per cycle, then read them back
    Memory {
        /// Which RAM block to build
        #[arg(short, long, value_enum, default_value_t = RamSize::Ram8)]
        size: RamSize,
        /// A write in the form ADDR=VALUE (repeatable)
        #[arg(short, long = "write", value_parser = parse_write)]
        writes: Vec<(usize, u16)>,
        /// Print a JSON snapshot of every non-zero word
        #[arg(long)]
        json: bool,
    },
    /// Run the built-in self-test
    Test,
}

#[derive(Clone, Copy, ValueEnum)]
enum RamSize {
    #[value(name = "8")]
    Ram8,
    #[value(name = "64")]
    Ram64,
    #[value(name = "512")]
    Ram512,
    #[value(name = "4k")]
    Ram4K,
    #[value(name = "16k")]
    Ram16K,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Gates) => {
            print_truth_tables();
        }
        Some(Commands::Alu { x, y, op, control }) => {
            run_alu(x, y, &op, control.as_deref());
        }
        Some(Commands::Count { cycles, load, at, reset_at, trace }) => {
            run_counter(cycles, load, at, reset_at, trace);
        }
        Some(Commands::Memory { size, writes, json }) => {
            use nand16::{Ram16K, Ram4K, Ram512, Ram64, Ram8};
            match size {
                RamSize::Ram8 => run_memory::<Ram8, 3>(&writes, json),
                RamSize::Ram64 => run_memory::<Ram64, 6>(&writes, json),
                RamSize::Ram512 => run_memory::<Ram512, 9>(&writes, json),
                RamSize::Ram4K => run_memory::<Ram4K, 12>(&writes, json),
                RamSize::Ram16K => run_memory::<Ram16K, 14>(&writes, json),
            }
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("nand16 v0.1.0");
            println!("A 16-bit datapath built from NAND gates");
            println!();
            println!("Use --help for available commands");
            println!();
            print_truth_tables();
        }
    }
}

/// Map the `-v` count onto a level; `None` leaves `RUST_LOG` in charge.
fn log_level(verbose: u8) -> Option<LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = log_level(verbose) {
        builder.filter_level(level);
    }
    builder.init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}", message);
    std::process::exit(1);
}

/// Parse `ADDR=VALUE`, where VALUE may be signed or unsigned 16-bit.
fn parse_write(s: &str) -> Result<(usize, u16), String> {
    let (addr, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VALUE, got '{}'", s))?;
    let addr: usize = addr
        .trim()
        .parse()
        .map_err(|e| format!("bad address '{}': {}", addr, e))?;
    let value: i32 = value
        .trim()
        .parse()
        .map_err(|e| format!("bad value '{}': {}", value, e))?;
    if !(i16::MIN as i32..=u16::MAX as i32).contains(&value) {
        return Err(format!("value {} does not fit in 16 bits", value));
    }
    Ok((addr, value as u16))
}

fn print_truth_tables() {
    use nand16::gates::{and, mux, nand, not, or, xor};
    use nand16::Signal;

    println!("━━━ Gates ━━━");
    println!();
    println!(" a b | nand and or xor");
    for a in Signal::ALL {
        for b in Signal::ALL {
            println!(
                " {} {} |  {}    {}   {}   {}",
                a, b, nand(a, b), and(a, b), or(a, b), xor(a, b)
            );
        }
    }
    println!();
    println!(" a | not");
    for a in Signal::ALL {
        println!(" {} |  {}", a, not(a));
    }
    println!();
    println!(" a b sel | mux");
    for sel in Signal::ALL {
        for a in Signal::ALL {
            for b in Signal::ALL {
                println!(" {} {}  {}  |  {}", a, b, sel, mux(a, b, sel));
            }
        }
    }
}

fn run_alu(x: i16, y: i16, op: &str, control: Option<&str>) {
    use nand16::{alu, AluControl, Bus16};

    let control = match control {
        Some(bits) => AluControl::parse_bits(bits),
        None => AluControl::from_mnemonic(op),
    }
    .unwrap_or_else(|e| fail(e));

    let result = alu(Bus16::from_i16(x), Bus16::from_i16(y), control);

    println!("x       = {} ({})", Bus16::from_i16(x), x);
    println!("y       = {} ({})", Bus16::from_i16(y), y);
    println!("control = {} ({})", control, control.mnemonic().unwrap_or("-"));
    println!("out     = {} ({})", result.out, result.out.to_i16());
    println!("zr      = {}", result.zr);
    println!("ng      = {}", result.ng);
}

fn run_counter(cycles: u32, load: Option<u16>, at: u32, reset_at: Option<u32>, trace: bool) {
    use nand16::{Bus16, ProgramCounter, Signal};

    let mut pc = ProgramCounter::new();
    let input = Bus16::from_u16(load.unwrap_or(0));

    for cycle in 0..cycles {
        let load_now = Signal::from_bool(load.is_some() && cycle == at);
        let reset_now = Signal::from_bool(reset_at == Some(cycle));
        let out = pc.evaluate(input, load_now, Signal::High, reset_now);
        if trace {
            println!("{:>6}: {} ({})", cycle, out, out.to_u16());
        }
    }

    println!("PC after {} cycles: {} ({})", cycles, pc.value(), pc.value().to_u16());
}

#[derive(Serialize)]
struct WordEntry {
    address: usize,
    value: u16,
    bits: String,
}

fn run_memory<M: nand16::MemoryBlock, const N: usize>(writes: &[(usize, u16)], json: bool) {
    use nand16::{Address, Bus16};

    let mut ram = M::default();

    let addresses: Vec<Address<N>> = writes
        .iter()
        .map(|&(index, _)| Address::<N>::from_index(index).unwrap_or_else(|e| fail(e)))
        .collect();

    for (addr, &(_, value)) in addresses.iter().zip(writes) {
        ram.write(Bus16::from_u16(value), addr.as_slice())
            .unwrap_or_else(|e| fail(e));
    }

    if json {
        let snapshot: Vec<WordEntry> = ram
            .dump()
            .into_iter()
            .map(|(address, word)| WordEntry {
                address,
                value: word.to_u16(),
                bits: word.to_string(),
            })
            .collect();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{}", text),
            Err(e) => fail(e),
        }
        return;
    }

    println!("━━━ RAM{} ━━━", M::WORDS);
    for addr in &addresses {
        let word = ram.read(addr.as_slice()).unwrap_or_else(|e| fail(e));
        println!("{:>5}: {} ({})", addr.to_index(), word, word.to_i16());
    }
}

fn run_self_test() {
    use nand16::arith::{add16, inc16};
    use nand16::gates::{dmux8way, nand, xor};
    use nand16::{alu, AluControl, Address, Bus16, Dff, MemoryBlock, ProgramCounter, Ram8, Signal};

    println!("━━━ nand16 Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;
    let mut check = |name: &str, ok: bool| {
        if ok {
            println!("{}... ✓", name);
            passed += 1;
        } else {
            println!("{}... ✗", name);
            failed += 1;
        }
    };

    // Test 1: NAND truth table
    let nand_ok = Signal::ALL.iter().all(|&a| {
        Signal::ALL
            .iter()
            .all(|&b| nand(a, b).is_low() == (a.is_high() && b.is_high()))
    });
    check("NAND truth table", nand_ok);

    // Test 2: XOR truth table
    let xor_ok = Signal::ALL.iter().all(|&a| {
        Signal::ALL
            .iter()
            .all(|&b| xor(a, b).is_high() == (a.is_high() != b.is_high()))
    });
    check("XOR truth table", xor_ok);

    // Test 3: Adder
    let sum = add16(Bus16::from_i16(12345), Bus16::from_i16(-6789));
    check("16-bit adder", sum.to_i16() == 12345 - 6789);

    // Test 4: Incrementer wraps
    check("Increment wraps", inc16(Bus16::ONES) == Bus16::ZERO);

    // Test 5: ALU subtraction and flags
    let sub_ok = AluControl::from_mnemonic("x-y")
        .map(|control| {
            let result = alu(Bus16::from_i16(3), Bus16::from_i16(10), control);
            result.out.to_i16() == -7 && result.ng.is_high() && result.zr.is_low()
        })
        .unwrap_or(false);
    check("ALU x-y with flags", sub_ok);

    // Test 6: Decoder is one-hot
    let decode = dmux8way(Signal::High, [Signal::High, Signal::Low, Signal::High]);
    let one_hot = decode
        .iter()
        .enumerate()
        .all(|(i, s)| s.is_high() == (i == 5));
    check("8-way decoder", one_hot);

    // Test 7: Flip-flop delay
    let mut dff = Dff::new();
    let first = dff.evaluate(Signal::High);
    let second = dff.evaluate(Signal::Low);
    check("Flip-flop one-cycle delay", first.is_low() && second.is_high());

    // Test 8: RAM8 write isolation
    let mut ram = Ram8::new();
    let ram_ok = (|| -> nand16::Result<bool> {
        ram.write(Bus16::from_u16(0xBEEF), Address::<3>::from_index(3)?.as_slice())?;
        let mut ok = true;
        for index in 0..8 {
            let word = ram.read(Address::<3>::from_index(index)?.as_slice())?;
            let expected = if index == 3 { Bus16::from_u16(0xBEEF) } else { Bus16::ZERO };
            ok &= word == expected;
        }
        Ok(ok)
    })()
    .unwrap_or(false);
    check("RAM8 write isolation", ram_ok);

    // Test 9: Program counter
    let mut pc = ProgramCounter::new();
    let counted = (1..=10u16).all(|n| pc.increment().to_u16() == n);
    let reset = pc.evaluate(Bus16::ONES, Signal::High, Signal::High, Signal::High);
    check("Program counter", counted && reset == Bus16::ZERO);

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
