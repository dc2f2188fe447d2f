//! Tomasulo out-of-order simulator CLI.
//!
//! This binary loads an assembly program and an optional JSON configuration,
//! runs the engine (for a fixed cycle count or to completion), and prints
//! the final architected state, the commit-ordered execution log, and the
//! aggregate statistics.

use clap::Parser;
use std::process;
use tomasim_core::common::UNDEFINED;
use tomasim_core::core::InstrEvent;
use tomasim_core::sim::loader;
use tomasim_core::{Config, Engine};

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Cycle-accurate Tomasulo out-of-order simulator",
    long_about = "Run an assembly program through the out-of-order engine.\n\nExamples:\n  tomasim programs/saxpy.s\n  tomasim programs/saxpy.s --config configs/wide.json --cycles 200\n  tomasim programs/saxpy.s --print-memory 0:64"
)]
struct Cli {
    /// Assembly program to simulate.
    program: String,

    /// JSON engine configuration (defaults used when omitted).
    #[arg(short, long)]
    config: Option<String>,

    /// Run for a fixed number of cycles instead of to completion.
    #[arg(long)]
    cycles: Option<u64>,

    /// Address the program is loaded at.
    #[arg(long, default_value_t = 0)]
    base_address: u32,

    /// Dump a data-memory byte range, as START:END.
    #[arg(long, value_name = "START:END")]
    print_memory: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path),
        None => Config::default(),
    };

    let mut engine = Engine::new(&config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let program = loader::load_file(&cli.program).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    engine.load_program(program, cli.base_address);

    let result = match cli.cycles {
        Some(n) => engine.run(n),
        None => engine.run_to_completion(),
    };
    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }

    print_registers(&engine);
    if let Some(range) = &cli.print_memory {
        print_memory(&engine, range);
    }
    print_log(&engine);
    engine.stats().print();
}

/// Reads and deserializes a JSON configuration file.
fn load_config(path: &str) -> Config {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {path}: {e}");
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {path}: {e}");
        process::exit(1);
    })
}

/// Prints every register that was written or has a pending producer.
fn print_registers(engine: &Engine) {
    println!("GENERAL PURPOSE REGISTERS");
    println!("{:>8} {:>22} {:>5}", "Register", "Value", "ROB");
    for reg in 0..32 {
        if let Some(tag) = engine.int_register_tag(reg) {
            println!("{:>8} {:>22} {:>5}", format!("R{reg}"), "-", tag);
        } else if engine.int_register(reg) != UNDEFINED {
            let value = engine.int_register(reg);
            println!(
                "{:>8} {:>22} {:>5}",
                format!("R{reg}"),
                format!("{} / {value:#010x}", value as i32),
                "-"
            );
        }
    }
    for reg in 0..32 {
        if let Some(tag) = engine.fp_register_tag(reg) {
            println!("{:>8} {:>22} {:>5}", format!("F{reg}"), "-", tag);
        } else if engine.fp_register_bits(reg) != UNDEFINED {
            let bits = engine.fp_register_bits(reg);
            println!(
                "{:>8} {:>22} {:>5}",
                format!("F{reg}"),
                format!("{} / {bits:#010x}", f32::from_bits(bits)),
                "-"
            );
        }
    }
    println!();
}

/// Dumps the data-memory bytes in `range` (`START:END`, decimal or 0x hex).
fn print_memory(engine: &Engine, range: &str) {
    let parse = |s: &str| -> usize {
        let parsed = s.strip_prefix("0x").map_or_else(
            || s.parse::<usize>().ok(),
            |hex| usize::from_str_radix(hex, 16).ok(),
        );
        parsed.unwrap_or_else(|| {
            eprintln!("Error: bad memory range `{range}` (expected START:END)");
            process::exit(1);
        })
    };
    let Some((start, end)) = range.split_once(':').map(|(a, b)| (parse(a), parse(b))) else {
        eprintln!("Error: bad memory range `{range}` (expected START:END)");
        process::exit(1);
    };

    let memory = engine.memory();
    let end = end.min(memory.len());
    println!("DATA MEMORY[{start:#010x}:{end:#010x}]");
    for (i, byte) in memory.iter().enumerate().take(end).skip(start) {
        if i % 4 == 0 {
            print!("{i:#010x}: ");
        }
        print!("{byte:02x} ");
        if i % 4 == 3 {
            println!();
        }
    }
    println!();
}

/// Prints the commit-ordered execution log.
fn print_log(engine: &Engine) {
    println!("EXECUTION LOG");
    println!("{}", InstrEvent::LOG_HEADER);
    for event in engine.events() {
        println!("{event}");
    }
    println!();
}
