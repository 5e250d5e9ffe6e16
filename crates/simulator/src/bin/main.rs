//! Queueing station simulator CLI
//!
//! Run a single-server finite-buffer station through simulated time.
//!
//! # Example
//!
//! ```bash
//! # One run with four waiting places at 90% load
//! qsim --buffer 4 --rho 0.9 --sim-time 100000
//!
//! # Twenty parallel replications, JSON output
//! qsim --rho 0.8 --replications 20 --json
//! ```

use clap::Parser;
use qsim_simulation::{Simulation, SimulationConfig};
use qsim_simulator::{run_replications_with, RunMode, RunReport, SimulatorError};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Queueing station simulator
///
/// Runs deterministic simulations of a single server with a finite buffer.
/// Reproducible when the same seeds are used.
#[derive(Parser, Debug)]
#[command(name = "qsim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of waiting places in the buffer
    #[arg(short = 'S', long, default_value = "4")]
    buffer: usize,

    /// Simulated time horizon
    #[arg(short = 't', long, default_value = "100000")]
    sim_time: f64,

    /// Target utilization (0 < rho < 1)
    #[arg(short = 'r', long, default_value = "0.5")]
    rho: f64,

    /// Seed of the inter-arrival time stream
    #[arg(long, default_value = "0")]
    seed_iat: u64,

    /// Seed of the service time stream
    #[arg(long, default_value = "1")]
    seed_st: u64,

    /// Significance level for confidence intervals
    #[arg(long, default_value = "0.05")]
    alpha: f64,

    /// Largest lag for the waiting time autocorrelation
    #[arg(long, default_value = "20")]
    max_lag: usize,

    /// Stop after this many arrivals instead of at the time horizon
    #[arg(short = 'n', long)]
    packets: Option<u64>,

    /// Run this many independent replications in parallel
    #[arg(short = 'R', long)]
    replications: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,qsim_simulator=info,qsim_simulation=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimulatorError> {
    let config = SimulationConfig::new(args.buffer)
        .with_sim_time(args.sim_time)
        .with_rho(args.rho)
        .with_seeds(args.seed_iat, args.seed_st)
        .with_alpha(args.alpha)
        .with_max_lag(args.max_lag);
    let mode = args.packets.map_or(RunMode::TimeLimit, RunMode::PacketLimit);

    info!(
        buffer = config.buffer_size,
        rho = config.rho,
        sim_time = config.sim_time,
        ?mode,
        replications = args.replications,
        "Starting simulation"
    );

    if let Some(count) = args.replications {
        let summary = run_replications_with(&config, count, mode)?;
        if args.json {
            println!("{}", to_json(&summary));
        } else {
            summary.print_summary();
        }
        return Ok(());
    }

    let mut sim = Simulation::new(config)?;
    let result = match mode {
        RunMode::TimeLimit => sim.run_to_time_limit()?,
        RunMode::PacketLimit(n) => sim.run_to_packet_count_limit(n, false)?,
    };
    let report = RunReport::from_simulation(&sim, result);
    if args.json {
        println!("{}", to_json(&report));
    } else {
        report.print_summary();
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
