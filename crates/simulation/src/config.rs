//! Simulation parameters.

use crate::SimulationError;
use qsim_stats::DEFAULT_RESAMPLE_SIZE;
use serde::{Deserialize, Serialize};

/// Parameters for one simulation instance.
///
/// Passed by value into [`Simulation::new`](crate::Simulation::new) and never
/// mutated by the run, so independent instances cannot interfere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of waiting places in the buffer (S).
    pub buffer_size: usize,

    /// Simulated time horizon for `run_to_time_limit`.
    pub sim_time: f64,

    /// Target utilization ρ; service times are exponential with mean ρ.
    pub rho: f64,

    /// Seed of the inter-arrival time stream.
    pub seed_iat: u64,

    /// Seed of the service time stream.
    pub seed_st: u64,

    /// Significance level for confidence intervals.
    pub alpha: f64,

    /// Largest lag tracked by the waiting time autocorrelation counter.
    pub max_lag: usize,

    /// Number of bootstrap resamples.
    pub resample_size: usize,
}

impl SimulationConfig {
    /// Create a configuration with the given buffer size and default
    /// everything else.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size,
            sim_time: 100_000.0,
            rho: 0.5,
            seed_iat: 0,
            seed_st: 1,
            alpha: 0.05,
            max_lag: 20,
            resample_size: DEFAULT_RESAMPLE_SIZE,
        }
    }

    /// Set the buffer size.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Set the simulated time horizon.
    pub fn with_sim_time(mut self, sim_time: f64) -> Self {
        self.sim_time = sim_time;
        self
    }

    /// Set the target utilization.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Set both stream seeds.
    pub fn with_seeds(mut self, seed_iat: u64, seed_st: u64) -> Self {
        self.seed_iat = seed_iat;
        self.seed_st = seed_st;
        self
    }

    /// Set the significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the largest autocorrelation lag.
    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// Set the number of bootstrap resamples.
    pub fn with_resample_size(mut self, resample_size: usize) -> Self {
        self.resample_size = resample_size;
        self
    }

    /// Rate of the service time stream (1/ρ).
    pub fn service_rate(&self) -> f64 {
        1.0 / self.rho
    }

    /// Check every parameter is within its domain.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.rho > 0.0 && self.rho < 1.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "rho must be in (0, 1), got {}",
                self.rho
            )));
        }
        if !self.sim_time.is_finite() || self.sim_time < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "sim_time must be finite and non-negative, got {}",
                self.sim_time
            )));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.resample_size == 0 {
            return Err(SimulationError::InvalidConfig(
                "resample_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(4)
    }
}
