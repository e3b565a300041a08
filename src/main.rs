//! revmath - CLI Entry Point
//!
//! Commands:
//! - `revmath apply <op> <reg>...` - Apply an operation to registers
//! - `revmath inverse <op>` - Print the inverse operation
//! - `revmath table <op> -w <width>...` - Print the truth table
//! - `revmath check <op> -w <width>...` - Verify inverse and injectivity
//! - `revmath test` - Built-in self-test

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use revmath::{Operation, Register};

#[derive(Parser)]
#[command(name = "revmath")]
#[command(version = "0.1.0")]
#[command(about = "Reversible fixed-width integer arithmetic operations")]
struct Cli {
    /// Log verification progress (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an operation to register values
    Apply {
        /// Operation name, e.g. "AddConstantModN(3, 5)"
        op: String,
        /// Registers as width:value (4:2) or bits MSB first (0b0010)
        #[arg(required = true)]
        registers: Vec<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the inverse of an operation
    Inverse {
        /// Operation name
        op: String,
    },
    /// Print the truth table over every valid input
    Table {
        /// Operation name
        op: String,
        /// Register widths, one per register
        #[arg(short, long = "width", required = true)]
        widths: Vec<u32>,
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the inverse restores every input and no two inputs collide
    Check {
        /// Operation name
        op: String,
        /// Register widths, one per register
        #[arg(short, long = "width", required = true)]
        widths: Vec<u32>,
    },
    /// Run the built-in self-test
    Test,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Apply { op, registers, json }) => {
            apply(&op, &registers, json);
        }
        Some(Commands::Inverse { op }) => {
            inverse(&op);
        }
        Some(Commands::Table { op, widths, json }) => {
            table(&op, &widths, json);
        }
        Some(Commands::Check { op, widths }) => {
            check(&op, &widths);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("revmath v0.1.0");
            println!("Reversible fixed-width integer arithmetic");
            println!();
            println!("Use --help for available commands");
            println!();
            demo();
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "revmath=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn parse_op(name: &str) -> Operation {
    match name.parse::<Operation>() {
        Ok(op) => op,
        Err(e) => {
            eprintln!("❌ Invalid operation '{}': {}", name, e);
            std::process::exit(1);
        }
    }
}

fn apply(name: &str, args: &[String], json: bool) {
    let op = parse_op(name);

    let mut regs = Vec::with_capacity(args.len());
    for arg in args {
        match arg.parse::<Register>() {
            Ok(reg) => regs.push(reg),
            Err(e) => {
                eprintln!("❌ Invalid register '{}': {}", arg, e);
                std::process::exit(1);
            }
        }
    }

    let out = match op.apply(&regs) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if json {
        print_json(&out);
        return;
    }

    println!("{}", op);
    for (i, (before, after)) in regs.iter().zip(&out).enumerate() {
        println!("  r{}: {} ({}) → {} ({})", i, before, before.value(), after, after.value());
    }
}

fn inverse(name: &str) {
    let op = parse_op(name);
    match op.inverse() {
        Ok(inv) => println!("{}", inv),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn table(name: &str, widths: &[u32], json: bool) {
    let op = parse_op(name);
    let rows = match revmath::truth_table(&op, widths) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if json {
        print_json(&rows);
        return;
    }

    println!("{} over widths {:?} ({} rows)", op, widths, rows.len());
    for row in &rows {
        println!("  {:?} → {:?}", row.input, row.output);
    }
}

fn check(name: &str, widths: &[u32]) {
    let op = parse_op(name);
    let mut failed = false;

    println!("━━━ Checking {} over widths {:?} ━━━", op, widths);

    if op.is_invertible() {
        print!("Inverse restores every input... ");
        match revmath::check_round_trip(&op, widths) {
            Ok(None) => println!("✓"),
            Ok(Some(m)) => {
                println!("✗ {:?} → {:?} → {:?}", m.input, m.output, m.restored);
                failed = true;
            }
            Err(e) => {
                println!("✗ {}", e);
                failed = true;
            }
        }
    } else {
        println!("Inverse: not declared for {}", op);
    }

    print!("No two inputs collide... ");
    match revmath::check_injective(&op, widths) {
        Ok(None) => println!("✓"),
        Ok(Some(c)) => {
            println!("✗ {:?} and {:?} both → {:?}", c.first, c.second, c.output);
            failed = true;
        }
        Err(e) => {
            println!("✗ {}", e);
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("❌ Failed to serialize output: {}", e);
            std::process::exit(1);
        }
    }
}

fn demo() {
    println!("━━━ Operation Demo ━━━");
    println!();

    let examples: [(&str, &[&str]); 5] = [
        ("AddConstant(3)", &["5:2"]),
        ("AddConstantModN(3, 4)", &["5:2"]),
        ("MultiplyByConstantModN(3, 5)", &["5:4"]),
        ("AddQuantum", &["5:4", "5:8", "1:0"]),
        ("QuantumDivision", &["5:4", "5:0", "5:9"]),
    ];

    for (name, args) in examples {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        apply(name, &args, false);
    }
}

fn run_self_test() {
    println!("━━━ revmath Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    let cases: [(&str, &[(u32, u64)], &[u64]); 9] = [
        ("AddConstant(3)", &[(5, 2)], &[5]),
        ("SubConstant(3)", &[(5, 4)], &[1]),
        ("AddConstantModN(3, 4)", &[(5, 2)], &[1]),
        ("MultiplyByConstantModN(3, 5)", &[(5, 4)], &[2]),
        ("AddQuantum", &[(4, 2), (4, 1)], &[2, 3]),
        ("AddQuantum", &[(4, 15), (4, 15), (1, 0)], &[15, 14, 1]),
        ("SubtractQuantum", &[(5, 5), (5, 7)], &[5, 2]),
        ("Comparator", &[(5, 16), (5, 8), (1, 0)], &[16, 8, 1]),
        ("QuantumDivision", &[(4, 2), (4, 0), (4, 7)], &[2, 3, 1]),
    ];

    for (name, input, expected) in cases {
        print!("{} on {:?}... ", name, input);
        let result = name.parse::<Operation>()
            .map_err(|e| e.to_string())
            .and_then(|op| {
                let regs = input.iter()
                    .map(|&(w, v)| Register::new(w, v))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| e.to_string())?;
                op.apply(&regs).map_err(|e| e.to_string())
            });

        match result {
            Ok(out) => {
                let got: Vec<u64> = out.iter().map(Register::value).collect();
                if got == expected {
                    println!("✓");
                    passed += 1;
                } else {
                    println!("✗ (got {:?}, expected {:?})", got, expected);
                    failed += 1;
                }
            }
            Err(e) => {
                println!("✗ ({})", e);
                failed += 1;
            }
        }
    }

    print!("AddConstantModN(3, 5) round trip on 3 bits... ");
    match Operation::add_constant_mod_n(3, 5).and_then(|op| revmath::check_round_trip(&op, &[3])) {
        Ok(None) => { println!("✓"); passed += 1; }
        Ok(Some(m)) => { println!("✗ ({:?})", m); failed += 1; }
        Err(e) => { println!("✗ ({})", e); failed += 1; }
    }

    print!("Non-invertible operations refuse to invert... ");
    if Operation::QUANTUM_DIVISION.inverse().is_err() {
        println!("✓");
        passed += 1;
    } else {
        println!("✗");
        failed += 1;
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
