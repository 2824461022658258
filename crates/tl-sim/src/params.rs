//! Startup parameters applied by [`crate::ProcessModel::initialize`].

use crate::error::SimResult;
use serde::{Deserialize, Serialize};
use tl_core::{ensure_finite, ensure_in_range, ensure_non_negative};

/// The nine operator inputs that set up a run.
///
/// Fill values are percentages of tank capacity. The start temperature is
/// applied to every tank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupParams {
    pub t1_fill_pct: f64,
    pub t2_fill_pct: f64,
    pub t3_fill_pct: f64,
    pub t4_fill_pct: f64,
    pub pump_speed: f64,
    pub heater_power: f64,
    pub pump_on: bool,
    pub heater_on: bool,
    pub start_temp_c: f64,
}

impl Default for StartupParams {
    fn default() -> Self {
        Self {
            t1_fill_pct: 80.0,
            t2_fill_pct: 10.0,
            t3_fill_pct: 20.0,
            t4_fill_pct: 10.0,
            pump_speed: 1.0,
            heater_power: 3.0,
            pump_on: true,
            heater_on: true,
            start_temp_c: 20.0,
        }
    }
}

impl StartupParams {
    /// Fill percentages in tank order T1..T4.
    pub fn fills_pct(&self) -> [f64; 4] {
        [
            self.t1_fill_pct,
            self.t2_fill_pct,
            self.t3_fill_pct,
            self.t4_fill_pct,
        ]
    }

    /// Reject parameters the model must never see.
    ///
    /// Fills must lie in `[0, 100]`; speed and power must be finite and not
    /// negative; the start temperature must be finite.
    pub fn validate(&self) -> SimResult<()> {
        ensure_in_range(self.t1_fill_pct, 0.0, 100.0, "t1_fill_pct")?;
        ensure_in_range(self.t2_fill_pct, 0.0, 100.0, "t2_fill_pct")?;
        ensure_in_range(self.t3_fill_pct, 0.0, 100.0, "t3_fill_pct")?;
        ensure_in_range(self.t4_fill_pct, 0.0, 100.0, "t4_fill_pct")?;
        ensure_non_negative(self.pump_speed, "pump_speed")?;
        ensure_non_negative(self.heater_power, "heater_power")?;
        ensure_finite(self.start_temp_c, "start_temp_c")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn defaults_match_start_dialog() {
        let p = StartupParams::default();
        assert_eq!(p.fills_pct(), [80.0, 10.0, 20.0, 10.0]);
        assert!(p.pump_on && p.heater_on);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_fill_outside_percent_range() {
        let p = StartupParams {
            t3_fill_pct: 101.0,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(SimError::Param(_))));

        let p = StartupParams {
            t1_fill_pct: -0.5,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        let p = StartupParams {
            start_temp_c: f64::NAN,
            ..Default::default()
        };
        assert!(p.validate().is_err());

        let p = StartupParams {
            pump_speed: f64::INFINITY,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }
}
