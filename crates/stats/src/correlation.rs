//! Covariance and correlation between two series.

use crate::{Counter, CounterReport, ReportDetail, StatsError, TimeIndependentCounter};

/// Counts pairs `(x, y)` and derives their covariance and correlation.
///
/// Built from three independent counters over `x`, `y` and `x·y`.
/// Covariance uses the (n−1) normalization, matching the variances, so the
/// correlation is the Pearson coefficient.
///
/// Through the [`Counter`] trait, `mean` and `variance` describe the product
/// series `x·y`.
#[derive(Debug, Clone, Default)]
pub struct CrossCorrelationCounter {
    name: String,
    x: TimeIndependentCounter,
    y: TimeIndependentCounter,
    xy: TimeIndependentCounter,
}

impl CrossCorrelationCounter {
    /// Create an empty counter.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            x: TimeIndependentCounter::new(format!("{name} (x)")),
            y: TimeIndependentCounter::new(format!("{name} (y)")),
            xy: TimeIndependentCounter::new(format!("{name} (xy)")),
            name,
        }
    }

    /// Record one pair.
    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
        self.xy.push(x * y);
    }

    /// The x series.
    pub fn x(&self) -> &TimeIndependentCounter {
        &self.x
    }

    /// The y series.
    pub fn y(&self) -> &TimeIndependentCounter {
        &self.y
    }

    /// The product series.
    pub fn product(&self) -> &TimeIndependentCounter {
        &self.xy
    }

    /// `(E[xy] − E[x]·E[y]) · n/(n−1)`.
    pub fn covariance(&self) -> Result<f64, StatsError> {
        let n = self.xy.len();
        if n < 2 {
            return Err(StatsError::InsufficientSamples {
                required: 2,
                actual: n,
            });
        }
        let population = self.xy.mean()? - self.x.mean()? * self.y.mean()?;
        Ok(population * n as f64 / (n - 1) as f64)
    }

    /// `cov(x, y) / sqrt(var(x)·var(y))`.
    pub fn correlation(&self) -> Result<f64, StatsError> {
        let var_x = self.x.variance()?;
        let var_y = self.y.variance()?;
        if var_x == 0.0 || var_y == 0.0 {
            return Err(StatsError::ZeroVariance("Correlation"));
        }
        Ok(self.covariance()? / (var_x * var_y).sqrt())
    }
}

impl Counter for CrossCorrelationCounter {
    type Sample = (f64, f64);

    fn name(&self) -> &str {
        &self.name
    }

    fn count(&mut self, (x, y): (f64, f64)) -> Result<(), StatsError> {
        self.push(x, y);
        Ok(())
    }

    fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.xy.reset();
    }

    fn sample_count(&self) -> usize {
        self.xy.len()
    }

    fn mean(&self) -> Result<f64, StatsError> {
        self.xy.mean()
    }

    fn variance(&self) -> Result<f64, StatsError> {
        self.xy.variance()
    }

    fn report(&self) -> CounterReport {
        CounterReport {
            name: self.name.clone(),
            samples: self.sample_count(),
            mean: self.mean().ok(),
            variance: self.variance().ok(),
            stddev: self.stddev().ok(),
            detail: ReportDetail::Correlation {
                covariance: self.covariance().ok(),
                correlation: self.correlation().ok(),
            },
        }
    }
}
