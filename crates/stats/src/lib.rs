//! Streaming statistics for simulation output.
//!
//! Every estimator implements [`Counter`]: push samples with `count`, read
//! back `mean`/`variance`/`stddev`, and get a structured [`CounterReport`].
//!
//! | Counter | Sample | Use |
//! |---------|--------|-----|
//! | [`TimeIndependentCounter`] | `f64` | per-packet quantities (waiting time) |
//! | [`TimeDependentCounter`] | [`TimedSample`] | quantities that persist between events (queue length) |
//! | [`CrossCorrelationCounter`] | `(f64, f64)` | covariance/correlation of two series |
//! | [`AutocorrelationCounter`] | `f64` | lag-k autocorrelation in O(max_lag) per sample |
//!
//! Degenerate queries (too few samples, zero variance) return [`StatsError`]
//! instead of NaN.

mod autocorrelation;
mod correlation;
mod counter;
mod error;
mod interval;
mod time_dependent;
mod time_independent;

pub use autocorrelation::AutocorrelationCounter;
pub use correlation::CrossCorrelationCounter;
pub use counter::{Counter, CounterReport, LagReport, ReportDetail};
pub use error::StatsError;
pub use interval::{student_t_quantile, BootstrapPolicy, ConfidenceInterval, DEFAULT_RESAMPLE_SIZE};
pub use time_dependent::{TimeDependentCounter, TimedSample};
pub use time_independent::TimeIndependentCounter;
