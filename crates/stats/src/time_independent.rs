//! Sample-count weighted statistics with confidence intervals.

use crate::interval::check_alpha;
use crate::{student_t_quantile, BootstrapPolicy, ConfidenceInterval, Counter, StatsError};
use rand::Rng;
use tracing::trace;

/// Counts values independent of how long they were valid.
///
/// Keeps every sample so it can bootstrap. Variance uses the unbiased
/// (n−1) estimator.
#[derive(Debug, Clone, Default)]
pub struct TimeIndependentCounter {
    name: String,
    values: Vec<f64>,
    sum: f64,
}

impl TimeIndependentCounter {
    /// Create an empty counter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            sum: 0.0,
        }
    }

    /// Record a value.
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
        self.sum += value;
    }

    /// All recorded values in arrival order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sum of all recorded values.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no values were recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, required: usize) -> Result<(), StatsError> {
        if self.values.len() < required {
            return Err(StatsError::InsufficientSamples {
                required,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    /// Analytic confidence interval for the mean using the t distribution.
    ///
    /// `h = sqrt(s²/n) · t(1−α/2, n−1)`; requires at least two samples.
    pub fn confidence_interval(&self, alpha: f64) -> Result<ConfidenceInterval, StatsError> {
        check_alpha(alpha)?;
        self.require(2)?;
        let n = self.values.len() as f64;
        let mean = self.mean()?;
        let variance = self.variance()?;
        let t = student_t_quantile(1.0 - alpha / 2.0, n - 1.0)?;
        let h = (variance / n).sqrt() * t;
        Ok(ConfidenceInterval {
            mean,
            lower: mean - h,
            upper: mean + h,
            alpha,
        })
    }

    /// Check if `x` lies in the analytic confidence interval.
    pub fn is_in_confidence_interval(&self, x: f64, alpha: f64) -> Result<bool, StatsError> {
        Ok(self.confidence_interval(alpha)?.contains(x))
    }

    /// Bootstrap confidence interval for the mean.
    ///
    /// Draws `resample_size` resamples of size n with replacement from the
    /// observed values using `rng`, then derives bounds per `policy`.
    pub fn bootstrap_confidence_interval<R: Rng>(
        &self,
        alpha: f64,
        resample_size: usize,
        policy: BootstrapPolicy,
        rng: &mut R,
    ) -> Result<ConfidenceInterval, StatsError> {
        check_alpha(alpha)?;
        self.require(2)?;
        if resample_size == 0 {
            return Err(StatsError::InvalidResampleSize);
        }

        trace!(name = %self.name, resample_size, ?policy, "Bootstrapping");

        let n = self.values.len();
        let mean = self.mean()?;
        let mut means: Vec<f64> = (0..resample_size)
            .map(|_| {
                let total: f64 = (0..n).map(|_| self.values[rng.gen_range(0..n)]).sum();
                total / n as f64
            })
            .collect();
        means.sort_by(f64::total_cmp);

        let lower_index = ((alpha / 2.0) * resample_size as f64) as usize;
        let upper_index =
            (((1.0 - alpha / 2.0) * resample_size as f64) as usize).min(resample_size - 1);
        let (low, high) = (means[lower_index], means[upper_index]);

        let (lower, upper) = match policy {
            BootstrapPolicy::Percentile => (low, high),
            // Deviations sort in the same order as the means they come from.
            BootstrapPolicy::Empirical => (mean - (high - mean), mean - (low - mean)),
        };

        Ok(ConfidenceInterval {
            mean,
            lower,
            upper,
            alpha,
        })
    }

    /// Check if `x` lies in a freshly computed bootstrap interval.
    pub fn is_in_bootstrap_confidence_interval<R: Rng>(
        &self,
        x: f64,
        alpha: f64,
        resample_size: usize,
        policy: BootstrapPolicy,
        rng: &mut R,
    ) -> Result<bool, StatsError> {
        Ok(self
            .bootstrap_confidence_interval(alpha, resample_size, policy, rng)?
            .contains(x))
    }
}

impl Counter for TimeIndependentCounter {
    type Sample = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn count(&mut self, sample: f64) -> Result<(), StatsError> {
        self.push(sample);
        Ok(())
    }

    fn reset(&mut self) {
        self.values.clear();
        self.sum = 0.0;
    }

    fn sample_count(&self) -> usize {
        self.values.len()
    }

    fn mean(&self) -> Result<f64, StatsError> {
        self.require(1)?;
        Ok(self.sum / self.values.len() as f64)
    }

    fn variance(&self) -> Result<f64, StatsError> {
        self.require(2)?;
        let mean = self.mean()?;
        let squares: f64 = self.values.iter().map(|v| (v - mean) * (v - mean)).sum();
        Ok(squares / (self.values.len() - 1) as f64)
    }
}
