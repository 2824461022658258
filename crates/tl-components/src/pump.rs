//! Transfer pump.

use crate::common::{Point, check_non_negative};
use crate::error::ComponentResult;
use crate::traits::{Instrumented, Reading};
use tl_controls::{BoolSignal, ScalarSignal};

/// Impeller rotation rate per unit speed (rad/s).
pub const IMPELLER_RAD_PER_S: f64 = 8.0;

/// Horizontal offset of the suction and discharge stubs from the pump centre.
pub const PORT_OFFSET: f64 = 25.0;

/// Fixed-displacement transfer pump.
///
/// The pump does not move liquid itself. The process model reads
/// [`Pump::is_running`] and [`Pump::speed`] and draws from the source tank.
///
/// The impeller angle is purely cosmetic: it advances by `8 * speed * dt`
/// while running so that a diagram can animate it.
#[derive(Clone, Debug)]
pub struct Pump {
    name: String,
    /// Centre on the plant diagram
    pub center: Point,
    running: BoolSignal,
    speed: ScalarSignal,
    angle_rad: f64,
}

impl Pump {
    /// Create a running pump at unit speed.
    pub fn new(name: impl Into<String>, center: Point) -> Self {
        Self {
            name: name.into(),
            center,
            running: BoolSignal::new(true),
            speed: ScalarSignal::new(1.0),
            angle_rad: 0.0,
        }
    }

    /// Advance the impeller animation by `dt` seconds.
    pub fn advance_animation(&mut self, dt: f64) {
        if self.running.get() {
            self.angle_rad += IMPELLER_RAD_PER_S * self.speed.get() * dt;
        }
    }

    pub fn set_running(&mut self, running: bool) {
        self.running.set(running);
    }

    /// Set the speed multiplier.
    ///
    /// # Errors
    /// Returns error if `speed` is negative or not finite.
    pub fn set_speed(&mut self, speed: f64) -> ComponentResult<()> {
        check_non_negative(speed, "pump speed")?;
        self.speed.set(speed);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn speed(&self) -> f64 {
        self.speed.get()
    }

    /// Impeller angle in radians (unwrapped).
    pub fn angle(&self) -> f64 {
        self.angle_rad
    }

    pub fn reset_animation(&mut self) {
        self.angle_rad = 0.0;
    }

    /// Suction stub on the diagram.
    pub fn inlet(&self) -> Point {
        Point::new(self.center.x - PORT_OFFSET, self.center.y)
    }

    /// Discharge stub on the diagram.
    pub fn outlet(&self) -> Point {
        Point::new(self.center.x + PORT_OFFSET, self.center.y)
    }
}

impl Instrumented for Pump {
    fn name(&self) -> &str {
        &self.name
    }

    fn readings(&self) -> Vec<Reading> {
        vec![("RUN", self.running.into()), ("SPEED", self.speed.into())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_advances_only_while_running() {
        let mut p = Pump::new("P1", Point::new(200.0, 300.0));
        p.set_speed(1.5).unwrap();
        p.advance_animation(0.1);
        assert!((p.angle() - 1.2).abs() < 1e-12);

        p.set_running(false);
        p.advance_animation(0.1);
        assert!((p.angle() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_speed() {
        let mut p = Pump::new("P1", Point::new(0.0, 0.0));
        assert!(p.set_speed(-1.0).is_err());
        assert!(p.set_speed(f64::NAN).is_err());
        assert_eq!(p.speed(), 1.0);
    }

    #[test]
    fn ports_straddle_centre() {
        let p = Pump::new("P1", Point::new(200.0, 300.0));
        assert_eq!(p.inlet(), Point::new(175.0, 300.0));
        assert_eq!(p.outlet(), Point::new(225.0, 300.0));
    }

    #[test]
    fn readings() {
        let mut p = Pump::new("P1", Point::new(0.0, 0.0));
        p.set_running(false);
        assert_eq!(p.reading("RUN").and_then(|v| v.as_bool_opt()), Some(false));
        assert_eq!(p.reading("speed").and_then(|v| v.as_scalar_opt()), Some(1.0));
    }
}
