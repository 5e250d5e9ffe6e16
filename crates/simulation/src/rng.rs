//! Seedable random variate streams.

use crate::SimulationError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, Uniform};

#[derive(Debug, Clone, Copy)]
enum Family {
    Exponential(Exp<f64>),
    Uniform(Uniform<f64>),
}

/// A single stream of random variates.
///
/// Backed by a `ChaCha8Rng` so the same seed yields the same draws on every
/// platform.
#[derive(Debug, Clone)]
pub struct RandomVariateSource {
    family: Family,
    seed: u64,
    rng: ChaCha8Rng,
}

impl RandomVariateSource {
    /// Exponential variates with the given rate (mean `1/rate`).
    pub fn exponential(rate: f64, seed: u64) -> Result<Self, SimulationError> {
        Ok(Self {
            family: Family::Exponential(exp(rate)?),
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Uniform variates over `[lo, hi)`.
    pub fn uniform(lo: f64, hi: f64, seed: u64) -> Result<Self, SimulationError> {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(SimulationError::InvalidDistribution(format!(
                "uniform bounds must be finite with lo < hi, got [{lo}, {hi})"
            )));
        }
        Ok(Self {
            family: Family::Uniform(Uniform::new(lo, hi)),
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Draw the next variate.
    pub fn next(&mut self) -> f64 {
        match &self.family {
            Family::Exponential(d) => d.sample(&mut self.rng),
            Family::Uniform(d) => d.sample(&mut self.rng),
        }
    }

    /// Install a new exponential rate and restart the stream from its seed.
    pub fn set_parameters(&mut self, rate: f64) -> Result<(), SimulationError> {
        self.family = Family::Exponential(exp(rate)?);
        self.reseed(self.seed);
        Ok(())
    }

    /// Restart the stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Seed the stream was last started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

fn exp(rate: f64) -> Result<Exp<f64>, SimulationError> {
    if !(rate.is_finite() && rate > 0.0) {
        return Err(SimulationError::InvalidDistribution(format!(
            "exponential rate must be positive and finite, got {rate}"
        )));
    }
    Exp::new(rate).map_err(|e| SimulationError::InvalidDistribution(e.to_string()))
}

/// The two independent streams a station draws from.
#[derive(Debug, Clone)]
pub struct VariateStreams {
    /// Inter-arrival times (rate 1).
    pub interarrival: RandomVariateSource,
    /// Service times (rate 1/ρ).
    pub service: RandomVariateSource,
}

impl VariateStreams {
    /// Build both streams from their rates and seeds.
    pub fn new(
        service_rate: f64,
        seed_iat: u64,
        seed_st: u64,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            interarrival: RandomVariateSource::exponential(1.0, seed_iat)?,
            service: RandomVariateSource::exponential(service_rate, seed_st)?,
        })
    }

    /// Next inter-arrival time.
    pub fn next_interarrival(&mut self) -> f64 {
        self.interarrival.next()
    }

    /// Next service time.
    pub fn next_service(&mut self) -> f64 {
        self.service.next()
    }
}
