//! Hold timers for debouncing derived booleans.
//!
//! A pipe that carries a trickle every other tick would blink on a diagram.
//! The hold timer re-arms whenever its condition is true and counts down
//! otherwise; the output stays true until the countdown reaches zero.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use tl_core::ensure_positive;

/// Remaining time below this is treated as expired, so that a hold of
/// `n * dt` expires after exactly `n` steps despite float accumulation.
const EXPIRY_EPS: f64 = 1e-9;

/// Retriggerable hold (off-delay) timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldTimer {
    /// Hold duration in seconds.
    hold_s: f64,
    /// Seconds left before the output drops.
    remaining_s: f64,
}

impl HoldTimer {
    /// Create an expired timer with the given hold duration.
    ///
    /// # Errors
    ///
    /// Returns an error if `hold_s` is not finite and positive.
    pub fn new(hold_s: f64) -> ControlResult<Self> {
        let hold_s = ensure_positive(hold_s, "hold duration").map_err(|_| {
            ControlError::InvalidArg {
                what: "hold duration must be finite and positive",
            }
        })?;
        Ok(Self {
            hold_s,
            remaining_s: 0.0,
        })
    }

    /// Feed one tick: re-arm on `condition`, otherwise count down by `dt`.
    ///
    /// Returns the held output after the update.
    pub fn update(&mut self, condition: bool, dt: f64) -> bool {
        if condition {
            self.remaining_s = self.hold_s;
        } else {
            self.remaining_s = (self.remaining_s - dt).max(0.0);
            if self.remaining_s < EXPIRY_EPS {
                self.remaining_s = 0.0;
            }
        }
        self.is_active()
    }

    /// Whether the held output is currently true.
    pub fn is_active(&self) -> bool {
        self.remaining_s > 0.0
    }

    /// Seconds left before the output drops.
    pub fn remaining(&self) -> f64 {
        self.remaining_s
    }

    /// Configured hold duration.
    pub fn hold(&self) -> f64 {
        self.hold_s
    }

    /// Expire the timer immediately.
    pub fn reset(&mut self) {
        self.remaining_s = 0.0;
    }
}
