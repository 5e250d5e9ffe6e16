//! Time-weighted statistics.

use crate::{Counter, StatsError};

/// A value observed at a point in simulated time.
///
/// The value is taken to have held since the previous sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSample {
    /// Value that held over the elapsed interval.
    pub value: f64,
    /// Time at which the interval ends.
    pub time: f64,
}

impl TimedSample {
    /// Create a sample.
    pub fn new(value: f64, time: f64) -> Self {
        Self { value, time }
    }
}

/// Counts values weighted by how long they were valid.
///
/// Accumulates `value·dt` and `value²·dt` and normalizes by the length of the
/// observation window, so the mean of a queue length signal is the
/// time-average number of waiting packets.
#[derive(Debug, Clone, Default)]
pub struct TimeDependentCounter {
    name: String,
    first_timestamp: f64,
    last_timestamp: f64,
    weighted_sum: f64,
    weighted_square_sum: f64,
    samples: usize,
}

impl TimeDependentCounter {
    /// Create a counter whose observation window starts at t = 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self::starting_at(name, 0.0)
    }

    /// Create a counter whose observation window starts at `time`.
    pub fn starting_at(name: impl Into<String>, time: f64) -> Self {
        Self {
            name: name.into(),
            first_timestamp: time,
            last_timestamp: time,
            weighted_sum: 0.0,
            weighted_square_sum: 0.0,
            samples: 0,
        }
    }

    /// Record `value` as having held from the previous sample until `time`.
    pub fn count_value(&mut self, value: f64, time: f64) -> Result<(), StatsError> {
        self.count(TimedSample::new(value, time))
    }

    /// Discard everything and restart the observation window at `time`.
    pub fn reset_at(&mut self, time: f64) {
        self.first_timestamp = time;
        self.last_timestamp = time;
        self.weighted_sum = 0.0;
        self.weighted_square_sum = 0.0;
        self.samples = 0;
    }

    /// Length of the observation window.
    pub fn duration(&self) -> f64 {
        self.last_timestamp - self.first_timestamp
    }

    /// Time of the most recent sample.
    pub fn last_timestamp(&self) -> f64 {
        self.last_timestamp
    }
}

impl Counter for TimeDependentCounter {
    type Sample = TimedSample;

    fn name(&self) -> &str {
        &self.name
    }

    fn count(&mut self, sample: TimedSample) -> Result<(), StatsError> {
        let dt = sample.time - self.last_timestamp;
        if dt < 0.0 {
            return Err(StatsError::NonMonotonicTime {
                time: sample.time,
                last: self.last_timestamp,
            });
        }
        self.weighted_sum += sample.value * dt;
        self.weighted_square_sum += sample.value * sample.value * dt;
        self.last_timestamp = sample.time;
        self.samples += 1;
        Ok(())
    }

    /// Restarts the window at the time of the most recent sample.
    fn reset(&mut self) {
        self.reset_at(self.last_timestamp);
    }

    fn sample_count(&self) -> usize {
        self.samples
    }

    fn mean(&self) -> Result<f64, StatsError> {
        let duration = self.duration();
        if duration <= 0.0 {
            return Err(StatsError::EmptyWindow);
        }
        Ok(self.weighted_sum / duration)
    }

    fn variance(&self) -> Result<f64, StatsError> {
        let mean = self.mean()?;
        // E[x²] − E[x]² can dip just below zero through rounding.
        Ok((self.weighted_square_sum / self.duration() - mean * mean).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_weighted_mean() {
        let mut counter = TimeDependentCounter::new("queue length");
        // 0 for [0, 2), 2 for [2, 3), 1 for [3, 4)
        counter.count_value(0.0, 2.0).unwrap();
        counter.count_value(2.0, 3.0).unwrap();
        counter.count_value(1.0, 4.0).unwrap();

        assert_eq!(counter.duration(), 4.0);
        assert_eq!(counter.mean(), Ok(0.75));
        // E[x²] = (4 + 1) / 4 = 1.25
        assert!((counter.variance().unwrap() - (1.25 - 0.5625)).abs() < 1e-12);
    }

    #[test]
    fn test_constant_signal_has_zero_variance() {
        let mut counter = TimeDependentCounter::new("busy");
        for t in 1..=10 {
            counter.count_value(1.0, t as f64).unwrap();
        }
        assert_eq!(counter.mean(), Ok(1.0));
        assert_eq!(counter.variance(), Ok(0.0));
    }

    #[test]
    fn test_time_going_backwards_is_error() {
        let mut counter = TimeDependentCounter::new("test");
        counter.count_value(1.0, 5.0).unwrap();
        assert_eq!(
            counter.count_value(1.0, 4.0),
            Err(StatsError::NonMonotonicTime {
                time: 4.0,
                last: 5.0
            })
        );
    }

    #[test]
    fn test_empty_window_is_error() {
        let counter = TimeDependentCounter::new("test");
        assert_eq!(counter.mean(), Err(StatsError::EmptyWindow));
    }

    #[test]
    fn test_reset_restarts_window() {
        let mut counter = TimeDependentCounter::new("test");
        counter.count_value(10.0, 5.0).unwrap();
        counter.reset();
        counter.count_value(2.0, 7.0).unwrap();
        assert_eq!(counter.duration(), 2.0);
        assert_eq!(counter.mean(), Ok(2.0));
    }
}
