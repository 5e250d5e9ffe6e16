//! Fixed-lag autocorrelation over a cyclic buffer.
//!
//! For every lag `k <= max_lag` the counter keeps `Σ x_i·x_{i−k}` up to date
//! as samples arrive, using only the last `max_lag + 1` samples. A query at
//! lag `k` then expands
//!
//! ```text
//! Σ_{i=k}^{n−1} (x_i − m)(x_{i−k} − m)
//!   = Σ x_i·x_{i−k} − m·(2S − first_k − last_k) + (n − k)·m²
//! ```
//!
//! where `S` is the sum of all samples and `first_k`/`last_k` are the sums of
//! the first and last `k` samples, which the products never pair up.

use crate::{Counter, CounterReport, LagReport, ReportDetail, StatsError, TimeIndependentCounter};
use tracing::debug;

/// Counts values and reports autocovariance/autocorrelation up to `max_lag`.
///
/// Each sample costs O(max_lag); queries cost O(lag).
#[derive(Debug, Clone)]
pub struct AutocorrelationCounter {
    base: TimeIndependentCounter,
    max_lag: usize,
    /// The first `max_lag + 1` samples ever seen.
    first_samples: Vec<f64>,
    /// Cyclic buffer of the most recent `max_lag + 1` samples.
    last_samples: Vec<f64>,
    /// `squared_sums[k] = Σ x_i · x_{i−k}`.
    squared_sums: Vec<f64>,
}

impl AutocorrelationCounter {
    /// Create an empty counter tracking lags `0..=max_lag`.
    pub fn new(name: impl Into<String>, max_lag: usize) -> Self {
        let cycle_len = max_lag + 1;
        Self {
            base: TimeIndependentCounter::new(name),
            max_lag,
            first_samples: vec![0.0; cycle_len],
            last_samples: vec![0.0; cycle_len],
            squared_sums: vec![0.0; cycle_len],
        }
    }

    /// Largest supported lag.
    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Change the largest supported lag. Discards all samples.
    pub fn set_max_lag(&mut self, max_lag: usize) {
        debug!(name = %self.base.name(), max_lag, "Resizing autocorrelation buffer");
        self.max_lag = max_lag;
        self.reset();
    }

    /// The underlying sample counter.
    pub fn samples(&self) -> &TimeIndependentCounter {
        &self.base
    }

    fn cycle_len(&self) -> usize {
        self.max_lag + 1
    }

    /// Record one sample.
    pub fn push(&mut self, x: f64) {
        self.base.push(x);
        let n = self.base.len() - 1;
        let cycle_len = self.cycle_len();
        if n < cycle_len {
            self.first_samples[n] = x;
        }
        self.last_samples[n % cycle_len] = x;

        for lag in 0..=self.max_lag.min(n) {
            self.squared_sums[lag] += x * self.last_samples[(n - lag) % cycle_len];
        }
    }

    fn check_lag(&self, lag: usize) -> Result<(), StatsError> {
        if lag > self.max_lag {
            return Err(StatsError::LagOutOfRange {
                lag,
                max_lag: self.max_lag,
            });
        }
        let n = self.base.len();
        let required = (lag + 1).max(2);
        if n < required {
            return Err(StatsError::InsufficientSamples {
                required,
                actual: n,
            });
        }
        Ok(())
    }

    /// Autocovariance at `lag`, normalized by the `n − lag` pairs it covers.
    pub fn auto_covariance(&self, lag: usize) -> Result<f64, StatsError> {
        self.check_lag(lag)?;
        let n = self.base.len();
        let cycle_len = self.cycle_len();
        let mean = self.base.mean()?;

        let sum_of_firsts: f64 = self.first_samples[..lag].iter().sum();
        let sum_of_lasts: f64 = (0..lag)
            .map(|i| self.last_samples[(n - 1 - i) % cycle_len])
            .sum();

        let pairs = (n - lag) as f64;
        let cross = self.squared_sums[lag]
            - mean * (2.0 * self.base.sum() - sum_of_firsts - sum_of_lasts);
        Ok(cross / pairs + mean * mean)
    }

    /// Autocorrelation at `lag`: autocovariance over the sample variance.
    pub fn auto_correlation(&self, lag: usize) -> Result<f64, StatsError> {
        self.check_lag(lag)?;
        let variance = self.base.variance()?;
        if variance == 0.0 {
            return Err(StatsError::ZeroVariance("Autocorrelation"));
        }
        Ok(self.auto_covariance(lag)? / variance)
    }
}

impl Counter for AutocorrelationCounter {
    type Sample = f64;

    fn name(&self) -> &str {
        self.base.name()
    }

    fn count(&mut self, sample: f64) -> Result<(), StatsError> {
        self.push(sample);
        Ok(())
    }

    fn reset(&mut self) {
        let cycle_len = self.cycle_len();
        self.base.reset();
        self.first_samples = vec![0.0; cycle_len];
        self.last_samples = vec![0.0; cycle_len];
        self.squared_sums = vec![0.0; cycle_len];
    }

    fn sample_count(&self) -> usize {
        self.base.len()
    }

    fn mean(&self) -> Result<f64, StatsError> {
        self.base.mean()
    }

    fn variance(&self) -> Result<f64, StatsError> {
        self.base.variance()
    }

    fn report(&self) -> CounterReport {
        let lags = (0..=self.max_lag)
            .map(|lag| LagReport {
                lag,
                covariance: self.auto_covariance(lag).ok(),
                correlation: self.auto_correlation(lag).ok(),
            })
            .collect();
        CounterReport {
            name: self.name().to_string(),
            samples: self.sample_count(),
            mean: self.mean().ok(),
            variance: self.variance().ok(),
            stddev: self.stddev().ok(),
            detail: ReportDetail::Autocorrelation { lags },
        }
    }
}
