//! Shared counter contract and structured reports.

use crate::StatsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A streaming estimator.
///
/// All counters share this contract so collections and reports can treat
/// them uniformly. `mean`, `variance` and `stddev` return an error instead
/// of a meaningless number when there are too few samples.
pub trait Counter {
    /// What one observation looks like for this counter.
    type Sample;

    /// Identifier used in reports.
    fn name(&self) -> &str;

    /// Record one observation.
    fn count(&mut self, sample: Self::Sample) -> Result<(), StatsError>;

    /// Forget all observations.
    fn reset(&mut self);

    /// Number of observations recorded since the last reset.
    fn sample_count(&self) -> usize;

    /// Estimated mean.
    fn mean(&self) -> Result<f64, StatsError>;

    /// Estimated variance.
    fn variance(&self) -> Result<f64, StatsError>;

    /// Estimated standard deviation.
    fn stddev(&self) -> Result<f64, StatsError> {
        self.variance().map(f64::sqrt)
    }

    /// Structured summary of the counter.
    fn report(&self) -> CounterReport {
        CounterReport {
            name: self.name().to_string(),
            samples: self.sample_count(),
            mean: self.mean().ok(),
            variance: self.variance().ok(),
            stddev: self.stddev().ok(),
            detail: ReportDetail::Plain,
        }
    }
}

/// Summary of one counter.
///
/// Quantities that could not be computed (e.g. variance of a single sample)
/// are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterReport {
    /// Counter name.
    pub name: String,
    /// Number of samples.
    pub samples: usize,
    /// Mean, if defined.
    pub mean: Option<f64>,
    /// Variance, if defined.
    pub variance: Option<f64>,
    /// Standard deviation, if defined.
    pub stddev: Option<f64>,
    /// Counter-specific extras.
    pub detail: ReportDetail,
}

/// Counter-specific part of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportDetail {
    /// Nothing beyond mean and variance.
    Plain,
    /// Cross-correlation between two series.
    Correlation {
        /// Covariance of x and y.
        covariance: Option<f64>,
        /// Pearson correlation of x and y.
        correlation: Option<f64>,
    },
    /// Autocorrelation for every lag up to the maximum.
    Autocorrelation {
        /// One entry per lag, starting at 0.
        lags: Vec<LagReport>,
    },
}

/// Autocovariance and autocorrelation at one lag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagReport {
    /// Lag in samples.
    pub lag: usize,
    /// Autocovariance, if defined.
    pub covariance: Option<f64>,
    /// Autocorrelation, if defined.
    pub correlation: Option<f64>,
}

struct Opt(Option<f64>);

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.6}"),
            None => write!(f, "n/a"),
        }
    }
}

impl fmt::Display for CounterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: n={}, mean={}, var={}",
            self.name,
            self.samples,
            Opt(self.mean),
            Opt(self.variance)
        )?;
        match &self.detail {
            ReportDetail::Plain => Ok(()),
            ReportDetail::Correlation {
                covariance,
                correlation,
            } => write!(f, ", cov={}, cor={}", Opt(*covariance), Opt(*correlation)),
            ReportDetail::Autocorrelation { lags } => {
                for lag in lags {
                    write!(
                        f,
                        "\n  lag {}: cov={}, cor={}",
                        lag.lag,
                        Opt(lag.covariance),
                        Opt(lag.correlation)
                    )?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_marks_missing_values() {
        let report = CounterReport {
            name: "waiting time".to_string(),
            samples: 1,
            mean: Some(2.0),
            variance: None,
            stddev: None,
            detail: ReportDetail::Plain,
        };
        assert_eq!(
            report.to_string(),
            "waiting time: n=1, mean=2.000000, var=n/a"
        );
    }
}
