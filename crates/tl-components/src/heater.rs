//! Immersion heater.

use crate::common::{Point, check_non_negative};
use crate::error::ComponentResult;
use crate::traits::{Instrumented, Reading};
use tl_controls::{BoolSignal, ScalarSignal};

/// Immersion heater with an adjustable power level.
///
/// The heater has no time-based state. The process model decides when it
/// is effective (energised and immersed) and applies [`Heater::temperature_rise`].
#[derive(Clone, Debug)]
pub struct Heater {
    name: String,
    /// Top-left corner of the heater element on the plant diagram
    pub origin: Point,
    energised: BoolSignal,
    power: ScalarSignal,
}

impl Heater {
    /// Create an energised heater at power 3.0.
    pub fn new(name: impl Into<String>, origin: Point) -> Self {
        Self {
            name: name.into(),
            origin,
            energised: BoolSignal::new(true),
            power: ScalarSignal::new(3.0),
        }
    }

    pub fn set_energised(&mut self, on: bool) {
        self.energised.set(on);
    }

    /// Set the power level.
    ///
    /// # Errors
    /// Returns error if `power` is negative or not finite.
    pub fn set_power(&mut self, power: f64) -> ComponentResult<()> {
        check_non_negative(power, "heater power")?;
        self.power.set(power);
        Ok(())
    }

    pub fn is_energised(&self) -> bool {
        self.energised.get()
    }

    pub fn power(&self) -> f64 {
        self.power.get()
    }

    /// Temperature rise over `dt` seconds at the current power, ignoring
    /// whether the heater is energised.
    pub fn temperature_rise(&self, gain: f64, dt: f64) -> f64 {
        gain * self.power.get() * dt
    }
}

impl Instrumented for Heater {
    fn name(&self) -> &str {
        &self.name
    }

    fn readings(&self) -> Vec<Reading> {
        vec![("ON", self.energised.into()), ("POWER", self.power.into())]
    }
}
