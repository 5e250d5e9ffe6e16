//! Error types for statistics queries.

use thiserror::Error;

/// Degenerate or invalid statistics requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Not enough samples for the requested estimator.
    #[error("Insufficient samples: need at least {required}, have {actual}")]
    InsufficientSamples {
        /// Minimum number of samples.
        required: usize,
        /// Samples available.
        actual: usize,
    },

    /// A quantity divides by a variance that is zero.
    #[error("{0} is undefined for zero variance")]
    ZeroVariance(&'static str),

    /// Requested lag exceeds the counter's configured maximum.
    #[error("Lag {lag} exceeds maximum lag {max_lag}")]
    LagOutOfRange {
        /// Requested lag.
        lag: usize,
        /// Configured maximum.
        max_lag: usize,
    },

    /// A time-weighted sample arrived before the previous one.
    #[error("Sample time {time} precedes last sample time {last}")]
    NonMonotonicTime {
        /// Offending sample time.
        time: f64,
        /// Time of the previous sample.
        last: f64,
    },

    /// Time-weighted statistics over a window of zero length.
    #[error("Observation window has zero duration")]
    EmptyWindow,

    /// Significance level outside (0, 1).
    #[error("Invalid significance level {0}: must lie in (0, 1)")]
    InvalidSignificance(f64),

    /// Bootstrap requested with zero resamples.
    #[error("Resample size must be positive")]
    InvalidResampleSize,

    /// Underlying distribution could not be constructed.
    #[error("Distribution error: {0}")]
    Distribution(String),
}
