//! Scheduler and virtual memory simulator CLI.
//!
//! This binary runs a scenario file through the simulator. It performs:
//! 1. **Loading:** Reads the JSON scenario (configuration plus units of work).
//! 2. **Overrides:** Applies tick limit, pacing and policy flags on top of the file.
//! 3. **Reporting:** Prints a per-unit summary and the run statistics.

use std::process;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::error;
use tracing_subscriber::EnvFilter;

use schedsim_core::config::{ReplacementPolicy, SchedulingPolicy};
use schedsim_core::process::{Process, SimulationProcessRef};
use schedsim_core::sim::Scenario;

#[derive(Parser, Debug)]
#[command(
    name = "schedsim",
    author,
    version,
    about = "Tick-driven CPU scheduling and paged virtual memory simulator",
    long_about = "Run a JSON scenario describing the machine configuration and the units of work.\n\nExamples:\n  schedsim run scenarios/rr.json\n  schedsim run scenarios/rr.json --scheduler SJF --replacement LFU\n  schedsim run scenarios/rr.json --delay-ms 100 --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario file to completion.
    Run {
        /// Scenario file (JSON).
        scenario: String,

        /// Hard tick limit; 0 runs until no work is left.
        #[arg(long)]
        max_ticks: Option<u64>,

        /// Delay between ticks in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Scheduling policy (RoundRobin, FCFS, FCLS, SJF).
        #[arg(long, value_parser = parse_policy::<SchedulingPolicy>)]
        scheduler: Option<SchedulingPolicy>,

        /// Page replacement policy (FIFO, LFU).
        #[arg(long, value_parser = parse_policy::<ReplacementPolicy>)]
        replacement: Option<ReplacementPolicy>,

        /// Log every frame assignment, hit and miss.
        #[arg(long)]
        trace: bool,
    },
}

/// Parses a policy name with the same spellings the scenario file accepts.
fn parse_policy<T: DeserializeOwned>(name: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .map_err(|e| format!("unknown policy '{name}': {e}"))
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            max_ticks,
            delay_ms,
            scheduler,
            replacement,
            trace,
        } => {
            init_logging(trace);
            let overrides = Overrides {
                max_ticks,
                delay_ms,
                scheduler,
                replacement,
            };
            if let Err(e) = cmd_run(&scenario, &overrides) {
                error!("{e}");
                process::exit(1);
            }
        }
    }
}

/// Command-line settings that replace values from the scenario file.
struct Overrides {
    max_ticks: Option<u64>,
    delay_ms: Option<u64>,
    scheduler: Option<SchedulingPolicy>,
    replacement: Option<ReplacementPolicy>,
}

/// Loads the scenario, applies overrides, runs it and prints the report.
fn cmd_run(path: &str, overrides: &Overrides) -> schedsim_core::common::SimResult<()> {
    let mut scenario = Scenario::from_path(path)?;
    let config = &mut scenario.config;
    if let Some(max_ticks) = overrides.max_ticks {
        config.simulation.max_ticks = max_ticks;
    }
    if let Some(delay) = overrides.delay_ms {
        config.simulation.tick_delay_ms = delay;
    }
    if let Some(policy) = overrides.scheduler {
        config.scheduler.policy = policy;
    }
    if let Some(policy) = overrides.replacement {
        config.memory.policy = policy;
    }

    println!("Scenario: {path}");
    println!(
        "  Scheduler: {:?} (quantum {})  Replacement: {:?}  Frames: {}  Pages: {}",
        config.scheduler.policy,
        config.scheduler.quantum,
        config.memory.policy,
        config.memory.frame_count(),
        config.memory.page_count
    );
    println!();

    let (mut sim, units) = scenario.build()?;
    sim.run()?;

    print_units(&units);
    sim.processing_unit().stats.print();
    Ok(())
}

fn print_units(units: &[SimulationProcessRef]) {
    let fmt_tick = |t: Option<u64>| t.map_or_else(|| "-".to_string(), |t| t.to_string());

    println!("{:<16} {:>8} {:>8} {:>8} {:>8}  STATUS", "NAME", "BURST", "START", "FINISH", "EXEC");
    for unit in units {
        let unit = unit.borrow();
        println!(
            "{:<16} {:>8} {:>8} {:>8} {:>8}  {}",
            unit.name(),
            unit.burst_time,
            fmt_tick(unit.start_time),
            fmt_tick(unit.finish_time),
            unit.execution_time(),
            unit.status()
        );
    }
}
