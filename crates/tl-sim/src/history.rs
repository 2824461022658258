//! Bounded trend history.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Samples reserved up front; larger histories grow on demand.
const PREALLOCATE_MAX: usize = 600;

/// One trend sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendSample {
    /// Elapsed simulated time (s)
    pub time_s: f64,
    /// Levels in tank order T1..T4
    pub levels: [f64; 4],
    /// Heated tank temperature (°C)
    pub heated_temp_c: f64,
}

/// Ring buffer of trend samples; the oldest sample is dropped first.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendHistory {
    samples: VecDeque<TrendSample>,
    max_len: usize,
}

impl TrendHistory {
    /// Create an empty history holding at most `max_len` samples
    /// (at least one).
    pub fn new(max_len: usize) -> Self {
        let max_len = max_len.max(1);
        Self {
            samples: VecDeque::with_capacity(max_len.min(PREALLOCATE_MAX)),
            max_len,
        }
    }

    pub fn push(&mut self, sample: TrendSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.max_len {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TrendSample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&TrendSample> {
        self.samples.back()
    }

    /// Owned copy, oldest first.
    pub fn to_vec(&self) -> Vec<TrendSample> {
        self.samples.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f64) -> TrendSample {
        TrendSample {
            time_s: t,
            levels: [0.0; 4],
            heated_temp_c: 20.0,
        }
    }

    #[test]
    fn drops_oldest_first() {
        let mut h = TrendHistory::new(3);
        for i in 0..5 {
            h.push(sample(i as f64));
        }
        assert_eq!(h.len(), 3);
        let times: Vec<f64> = h.iter().map(|s| s.time_s).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0]);
        assert_eq!(h.latest().map(|s| s.time_s), Some(4.0));
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut h = TrendHistory::new(0);
        h.push(sample(1.0));
        h.push(sample(2.0));
        assert_eq!(h.len(), 1);
        assert_eq!(h.max_len(), 1);
    }

    #[test]
    fn huge_capacity_allocates_lazily() {
        let mut h = TrendHistory::new(usize::MAX);
        h.push(sample(0.2));
        assert_eq!(h.len(), 1);
        assert_eq!(h.max_len(), usize::MAX);
    }

    #[test]
    fn clear_empties() {
        let mut h = TrendHistory::new(10);
        h.push(sample(0.2));
        h.clear();
        assert!(h.is_empty());
        assert!(h.to_vec().is_empty());
    }
}
