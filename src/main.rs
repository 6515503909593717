//! APEX Pipeline Simulator CLI.
//!
//! The main executable for the simulator. It parses the command line,
//! loads the program and optional configuration, drives the engine for
//! the requested cycle budget, and prints the final architectural state.
//!
//! # Usage
//!
//! `apex-sim <input_file> <mode> <cycles>` where mode is `simulate`
//! (final state only) or `display` (per-cycle stage traces as well).
//! `--forwarding` selects the forwarding variant, `--config` points at a
//! TOML configuration file, and `--json` emits the final state as JSON.

use clap::{Parser, ValueEnum};
use std::process;

use apex_sim::config::Config;
use apex_sim::core::{Cpu, HazardMode};
use apex_sim::sim::{loader, printer};

/// Output mode for a run.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Run silently and print only the final state.
    Simulate,
    /// Additionally print the per-cycle stage trace.
    Display,
}

/// Command-line arguments for the APEX pipeline simulator.
#[derive(Debug, Parser)]
#[command(author, version, about = "APEX seven-stage pipeline simulator")]
struct Args {
    /// Program file to load.
    input_file: String,

    /// Output mode.
    #[arg(value_enum)]
    mode: Mode,

    /// Cycle budget: the run executes at most this many cycles.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    cycles: u64,

    /// Resolve hazards by operand forwarding instead of stalling alone.
    #[arg(long)]
    forwarding: bool,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Emit the final state as JSON instead of the tabular dump.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("apex-sim: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };

    let mode = if args.forwarding || config.general.forwarding {
        HazardMode::Forwarding
    } else {
        HazardMode::Stall
    };
    let display = matches!(args.mode, Mode::Display) || config.general.trace;

    let program = loader::load_program(&args.input_file)?;
    let mut cpu = Cpu::new(program, mode, &config.machine);

    if display {
        printer::print_code_listing(&cpu.code);
    }

    for _ in 0..args.cycles {
        if cpu.halted {
            break;
        }
        let trace = cpu.tick()?;
        if display {
            printer::print_cycle(&trace);
        }
    }

    if args.json {
        let report = printer::final_state(&cpu, config.machine.dump_memory_words);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        printer::print_final_state(&cpu, config.machine.dump_memory_words);
    }
    cpu.stats.print();
    Ok(())
}
