//! Sample cadence for trend recording.
//!
//! The plant steps at a small fixed dt while trends are recorded at a coarser
//! period. The accumulator sums elapsed step time and fires once the period
//! has been reached, then starts over from zero.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use tl_core::ensure_positive;

/// Slack when comparing the accumulated time against the period, so ten
/// steps of 0.02 s reach a 0.2 s period.
const PERIOD_EPS: f64 = 1e-9;

/// Accumulating sample clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleAccumulator {
    /// Sample period in seconds.
    period_s: f64,
    /// Time accumulated since the last sample.
    accumulated_s: f64,
}

impl SampleAccumulator {
    /// Create a new accumulator.
    ///
    /// # Errors
    ///
    /// Returns an error if `period_s` is not finite and positive.
    pub fn new(period_s: f64) -> ControlResult<Self> {
        let period_s = ensure_positive(period_s, "sample period").map_err(|_| {
            ControlError::InvalidArg {
                what: "sample period must be finite and positive",
            }
        })?;
        Ok(Self {
            period_s,
            accumulated_s: 0.0,
        })
    }

    /// Add `dt` seconds. Returns `true` when a sample is due, in which case
    /// the accumulator restarts at zero.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.accumulated_s += dt;
        if self.accumulated_s + PERIOD_EPS >= self.period_s {
            self.accumulated_s = 0.0;
            true
        } else {
            false
        }
    }

    /// Sample period in seconds.
    pub fn period(&self) -> f64 {
        self.period_s
    }

    /// Time accumulated since the last sample.
    pub fn accumulated(&self) -> f64 {
        self.accumulated_s
    }

    /// Discard accumulated time.
    pub fn reset(&mut self) {
        self.accumulated_s = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_period() {
        assert!(SampleAccumulator::new(0.0).is_err());
        assert!(SampleAccumulator::new(f64::INFINITY).is_err());
    }

    #[test]
    fn fires_every_ten_steps_at_nominal_rate() {
        let mut acc = SampleAccumulator::new(0.2).unwrap();
        let fired: Vec<usize> = (1..=50).filter(|_| acc.advance(0.02)).collect();
        assert_eq!(fired.len(), 5);

        let mut acc = SampleAccumulator::new(0.2).unwrap();
        for step in 1..10 {
            assert!(!acc.advance(0.02), "fired early at step {step}");
        }
        assert!(acc.advance(0.02));
        assert_eq!(acc.accumulated(), 0.0);
    }

    #[test]
    fn large_step_fires_immediately_and_drops_remainder() {
        let mut acc = SampleAccumulator::new(0.2).unwrap();
        assert!(acc.advance(0.5));
        assert_eq!(acc.accumulated(), 0.0);
    }

    #[test]
    fn reset_clears_progress() {
        let mut acc = SampleAccumulator::new(0.2).unwrap();
        acc.advance(0.15);
        acc.reset();
        assert!(!acc.advance(0.1));
    }
}
