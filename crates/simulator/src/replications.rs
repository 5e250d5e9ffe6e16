//! Independent replications run in parallel.
//!
//! Each replication is a separate [`Simulation`] with its own seeds, so the
//! runs share nothing and can be spread across cores with rayon. Results are
//! collected in replication order, which keeps the summary independent of
//! thread scheduling.

use crate::SimulatorError;
use qsim_simulation::{Simulation, SimulationConfig, SimulationResult};
use qsim_stats::{ConfidenceInterval, Counter, TimeIndependentCounter};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// How long each replication runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Until the configured horizon.
    #[default]
    TimeLimit,
    /// Until this many arrivals have been processed.
    PacketLimit(u64),
}

/// Which random stream of a replication a seed is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedStream {
    /// Inter-arrival times.
    Interarrival,
    /// Service times.
    Service,
}

impl SeedStream {
    fn salt(self) -> u64 {
        match self {
            SeedStream::Interarrival => 0x517cc1b727220a95,
            SeedStream::Service => 0x9e3779b97f4a7c15,
        }
    }
}

/// SplitMix64 finalizer: a bijection on u64 that scatters nearby inputs.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Derive the seed of `stream` in replication `index` from a base seed.
///
/// Distinct indices always give distinct seeds within a stream, and the
/// per-stream salt keeps one replication's service stream from reappearing
/// as a neighbour's inter-arrival stream.
pub fn derive_seed(base: u64, stream: SeedStream, index: u64) -> u64 {
    mix(mix(base ^ stream.salt()).wrapping_add(index))
}

/// Configuration of replication `index`: same parameters, derived seeds.
pub fn replication_config(config: &SimulationConfig, index: u64) -> SimulationConfig {
    config.clone().with_seeds(
        derive_seed(config.seed_iat, SeedStream::Interarrival, index),
        derive_seed(config.seed_st, SeedStream::Service, index),
    )
}

/// Aggregate over all replications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSummary {
    /// Base configuration the replications were derived from.
    pub config: SimulationConfig,
    /// How each replication ran.
    pub mode: RunMode,
    /// One result per replication, in replication order.
    pub runs: Vec<SimulationResult>,
    /// Interval for the mean blocking probability, if at least two runs.
    pub blocking_probability: Option<ConfidenceInterval>,
    /// Interval for the mean utilization, if at least two runs.
    pub system_utilization: Option<ConfidenceInterval>,
    /// Interval for the mean waiting time over runs that completed packets.
    pub mean_waiting_time: Option<ConfidenceInterval>,
}

impl ReplicationSummary {
    /// Number of replications.
    pub fn replications(&self) -> usize {
        self.runs.len()
    }
}

/// Run `count` time-limited replications of `config` in parallel.
pub fn run_replications(
    config: &SimulationConfig,
    count: u64,
) -> Result<ReplicationSummary, SimulatorError> {
    run_replications_with(config, count, RunMode::TimeLimit)
}

/// Run `count` replications of `config` in parallel using `mode`.
pub fn run_replications_with(
    config: &SimulationConfig,
    count: u64,
    mode: RunMode,
) -> Result<ReplicationSummary, SimulatorError> {
    if count == 0 {
        return Err(SimulatorError::NoReplications);
    }
    config.validate()?;
    info!(count, ?mode, "Running replications");

    let runs = (0..count)
        .into_par_iter()
        .map(|index| run_one(config, index, mode))
        .collect::<Result<Vec<_>, _>>()?;

    let mut blocking = TimeIndependentCounter::new("blocking probability");
    let mut utilization = TimeIndependentCounter::new("system utilization");
    let mut waiting = TimeIndependentCounter::new("mean waiting time");
    for run in &runs {
        blocking.push(run.blocking_probability);
        utilization.push(run.system_utilization);
        if let Some(w) = run.mean_waiting_time {
            waiting.push(w);
        }
    }

    let summary = ReplicationSummary {
        config: config.clone(),
        mode,
        blocking_probability: interval(&blocking, config.alpha)?,
        system_utilization: interval(&utilization, config.alpha)?,
        mean_waiting_time: interval(&waiting, config.alpha)?,
        runs,
    };
    info!(
        replications = summary.replications(),
        mean_blocking = blocking.mean().ok(),
        mean_utilization = utilization.mean().ok(),
        "Replications finished"
    );
    Ok(summary)
}

fn run_one(
    config: &SimulationConfig,
    index: u64,
    mode: RunMode,
) -> Result<SimulationResult, SimulatorError> {
    let config = replication_config(config, index);
    debug!(index, seed_iat = config.seed_iat, seed_st = config.seed_st, "Starting replication");
    let mut sim = Simulation::new(config)?;
    let result = match mode {
        RunMode::TimeLimit => sim.run_to_time_limit(),
        RunMode::PacketLimit(n) => sim.run_to_packet_count_limit(n, false),
    };
    result.map_err(|source| SimulatorError::Replication { index, source })
}

/// Analytic interval, or `None` with fewer than two samples.
fn interval(
    counter: &TimeIndependentCounter,
    alpha: f64,
) -> Result<Option<ConfidenceInterval>, SimulatorError> {
    if counter.len() < 2 {
        return Ok(None);
    }
    Ok(Some(counter.confidence_interval(alpha)?))
}
