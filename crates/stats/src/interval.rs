//! Confidence interval types and the Student t quantile.

use crate::StatsError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Default number of bootstrap resamples.
pub const DEFAULT_RESAMPLE_SIZE: usize = 5000;

/// A two-sided confidence interval around a sample mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Observed sample mean.
    pub mean: f64,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Significance level the interval was built for.
    pub alpha: f64,
}

impl ConfidenceInterval {
    /// Half of the interval width.
    pub fn half_width(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }

    /// Check if `x` lies within `[lower, upper]`.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

/// How bootstrap bounds are derived from the resample means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootstrapPolicy {
    /// Bounds are the α/2 and 1−α/2 quantiles of the resample means.
    #[default]
    Percentile,

    /// Pivotal bounds: the observed mean minus the upper and lower quantiles
    /// of the deviations of resample means from the observed mean.
    Empirical,
}

/// Quantile `p` of the Student t distribution with `freedom` degrees of freedom.
pub fn student_t_quantile(p: f64, freedom: f64) -> Result<f64, StatsError> {
    let dist = StudentsT::new(0.0, 1.0, freedom)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(dist.inverse_cdf(p))
}

pub(crate) fn check_alpha(alpha: f64) -> Result<(), StatsError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidSignificance(alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_quantile_known_values() {
        // Two-sided 95% with 9 degrees of freedom.
        let t = student_t_quantile(0.975, 9.0).unwrap();
        assert!((t - 2.262157).abs() < 1e-4, "got {t}");

        let t = student_t_quantile(0.95, 1.0).unwrap();
        assert!((t - 6.313752).abs() < 1e-3, "got {t}");
    }

    #[test]
    fn test_interval_membership() {
        let ci = ConfidenceInterval {
            mean: 1.0,
            lower: 0.5,
            upper: 1.5,
            alpha: 0.05,
        };
        assert!(ci.contains(0.5));
        assert!(ci.contains(1.5));
        assert!(!ci.contains(1.6));
        assert_eq!(ci.half_width(), 0.5);
    }

    #[test]
    fn test_alpha_bounds() {
        assert!(check_alpha(0.05).is_ok());
        assert_eq!(check_alpha(0.0), Err(StatsError::InvalidSignificance(0.0)));
        assert_eq!(check_alpha(1.0), Err(StatsError::InvalidSignificance(1.0)));
    }
}
