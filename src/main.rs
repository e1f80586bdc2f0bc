//! Pipeline simulator CLI.
//!
//! Loads an assembly program (and optionally a data image), runs it to
//! completion on the simulated processor, and prints run statistics plus
//! whatever traces were requested.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use riscv_pipesim::common::SimError;
use riscv_pipesim::config::SimConfig;
use riscv_pipesim::core::Processor;
use riscv_pipesim::sim::loader;

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-accurate 5-stage pipeline simulator")]
struct Args {
    /// Assembly program file, one instruction per line.
    program: PathBuf,

    /// Initial data memory image (`address: value` lines).
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run without pipelining, one full instruction per cycle.
    #[arg(long)]
    single_cycle: bool,

    /// Disable forwarding; every RAW dependency stalls until writeback.
    #[arg(long)]
    no_forwarding: bool,

    /// Dump the register file when the run finishes.
    #[arg(long)]
    trace_regs: bool,

    /// Dump pipeline latch contents when the run finishes.
    #[arg(long)]
    trace_pipeline: bool,

    /// Dump the branch predictor tables when the run finishes.
    #[arg(long)]
    trace_predictor: bool,

    /// Trace only the instruction with this sequence number.
    #[arg(long, value_name = "SEQ")]
    follow: Option<u64>,

    /// Abort after this many cycles.
    #[arg(long, value_name = "N")]
    max_cycles: Option<u64>,

    /// Print the statistics as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

fn build_config(args: &Args) -> Result<SimConfig, SimError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    if args.single_cycle {
        config.pipeline.enabled = false;
    }
    if args.no_forwarding {
        config.pipeline.forwarding = false;
    }
    if args.trace_regs {
        config.trace.registers = true;
    }
    if args.trace_pipeline {
        config.trace.pipeline = true;
    }
    if args.trace_predictor {
        config.trace.predictor = true;
    }
    if args.follow.is_some() {
        config.trace.instruction = args.follow;
    }
    if let Some(limit) = args.max_cycles {
        config.limits.max_cycles = limit;
    }

    Ok(config)
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = build_config(args)?;

    let program = loader::load_program(&args.program)?;
    let data = match &args.data {
        Some(path) => loader::load_data(path)?,
        None => Vec::new(),
    };

    println!("Simulator Configuration");
    println!("-----------------------");
    println!("  Program:     {} ({} instructions)", args.program.display(), program.len());
    println!(
        "  Mode:        {}",
        if config.pipeline.enabled {
            "pipelined"
        } else {
            "single-cycle"
        }
    );
    println!(
        "  Forwarding:  {}",
        if config.pipeline.forwarding {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("  Cycle limit: {}", config.limits.max_cycles);
    println!("-----------------------");

    let mut processor = Processor::new(program, data, &config);
    let result = processor.run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(processor.statistics())?);
    } else {
        processor.statistics().print();
    }

    if let Some(trace) = config.trace.instruction {
        println!("\n===== Trace of instruction #{trace} =====");
        for entry in processor.instruction_trace() {
            let stage = entry
                .stage
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "cycle {:>4}  pc {:#06x}  {:<10} {}{}{}",
                entry.cycle,
                entry.pc.unwrap_or(0),
                stage,
                entry.instruction,
                if entry.stall { "  [stall]" } else { "" },
                if entry.flush { "  [flush]" } else { "" },
            );
        }
    }

    if let Some(regs) = processor.register_file() {
        println!("\n===== Register File =====");
        regs.dump();
    }

    if let Some(latches) = processor.pipeline_registers() {
        println!("\n===== Pipeline Registers =====");
        for latch in latches {
            if latch.valid {
                println!("{:<7} pc {:#06x}  {}", latch.name, latch.pc, latch.instruction);
            } else {
                println!("{:<7} (empty)", latch.name);
            }
        }
    }

    if let Some(state) = processor.predictor_state() {
        println!("\n===== Branch Predictor =====");
        println!("PHT:");
        for entry in &state.pht {
            println!(
                "  {:#06x} -> {}",
                entry.pc,
                if entry.taken { "taken" } else { "not taken" }
            );
        }
        println!("BTB:");
        for entry in &state.btb {
            println!("  {:#06x} -> {:#06x}", entry.pc, entry.target);
        }
    }

    result
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("\n[!] {e}");
        process::exit(1);
    }
}
