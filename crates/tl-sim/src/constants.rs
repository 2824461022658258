//! Tuning constants of the plant balance.

use crate::error::SimResult;
use serde::{Deserialize, Serialize};
use tl_core::{ensure_finite, ensure_in_range, ensure_non_negative, ensure_positive};

/// Upper bound on retained trend samples.
pub const MAX_HISTORY_LEN: usize = 100_000;

/// Rates, floors and thresholds used by [`crate::ProcessModel::step`].
///
/// Volumes are in abstract units (each tank holds `tank_capacity`), rates in
/// units per second, temperatures in °C.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConstants {
    /// Capacity of every tank
    pub tank_capacity: f64,
    /// Pump delivery at speed 1.0
    pub base_flow: f64,
    /// Gravity drain rate from T2 and T3 into T4
    pub drain_rate: f64,
    /// T2/T3 drain only above this quantity
    pub drain_floor: f64,
    /// Return rate from T4 to T1 at zero level
    pub return_base: f64,
    /// Extra return rate per unit of T4 level
    pub return_slope: f64,
    /// T4 returns only above this quantity
    pub return_floor: f64,
    /// T4 level above which the overflow valve opens
    pub overflow_level: f64,
    /// Overflow valve discharge rate (leaves the plant)
    pub overflow_rate: f64,
    /// Heated tank level below which the heater has no effect
    pub heater_min_level: f64,
    /// Heated tank temperature rise per unit heater power per second
    pub heating_gain: f64,
    /// Ambient temperature every tank relaxes toward
    pub ambient_temp_c: f64,
    /// First-order cooling coefficient (1/s)
    pub cooling_rate: f64,
    /// Volume per tick above which a pipe counts as carrying flow
    pub flow_threshold: f64,
    /// Pipe indicator hold time
    pub flow_hold_s: f64,
    /// Trend sample period
    pub sample_period_s: f64,
    /// Maximum retained trend samples
    pub history_len: usize,
}

impl Default for PlantConstants {
    fn default() -> Self {
        Self {
            tank_capacity: 100.0,
            base_flow: 18.0,
            drain_rate: 7.0,
            drain_floor: 2.0,
            return_base: 8.0,
            return_slope: 20.0,
            return_floor: 1.0,
            overflow_level: 0.97,
            overflow_rate: 25.0,
            heater_min_level: 0.10,
            heating_gain: 2.5,
            ambient_temp_c: 20.0,
            cooling_rate: 0.08,
            flow_threshold: 0.05,
            flow_hold_s: 0.30,
            sample_period_s: 0.2,
            history_len: 600,
        }
    }
}

impl PlantConstants {
    /// Reject constants that would break the clamp invariants.
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.tank_capacity, "tank_capacity")?;
        ensure_positive(self.flow_hold_s, "flow_hold_s")?;
        ensure_positive(self.sample_period_s, "sample_period_s")?;
        for (v, what) in [
            (self.base_flow, "base_flow"),
            (self.drain_rate, "drain_rate"),
            (self.drain_floor, "drain_floor"),
            (self.return_base, "return_base"),
            (self.return_slope, "return_slope"),
            (self.return_floor, "return_floor"),
            (self.overflow_rate, "overflow_rate"),
            (self.heating_gain, "heating_gain"),
            (self.cooling_rate, "cooling_rate"),
            (self.flow_threshold, "flow_threshold"),
        ] {
            ensure_non_negative(v, what)?;
        }
        ensure_in_range(self.overflow_level, 0.0, 1.0, "overflow_level")?;
        ensure_in_range(self.heater_min_level, 0.0, 1.0, "heater_min_level")?;
        ensure_finite(self.ambient_temp_c, "ambient_temp_c")?;
        if self.history_len == 0 || self.history_len > MAX_HISTORY_LEN {
            return Err(crate::error::SimError::InvalidArg {
                what: "history_len must be between 1 and 100000",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PlantConstants::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_capacity() {
        let c = PlantConstants {
            tank_capacity: 0.0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_negative_rate_and_empty_history() {
        let c = PlantConstants {
            drain_rate: -1.0,
            ..Default::default()
        };
        assert!(c.validate().is_err());

        let c = PlantConstants {
            history_len: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_oversized_history() {
        let c = PlantConstants {
            history_len: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(crate::error::SimError::InvalidArg { .. })
        ));
        assert!(crate::ProcessModel::with_constants(c).is_err());

        let c = PlantConstants {
            history_len: MAX_HISTORY_LEN,
            ..Default::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_negative_heating_gain() {
        let c = PlantConstants {
            heating_gain: -2.5,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }
}
