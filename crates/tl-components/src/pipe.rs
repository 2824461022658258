//! Diagram pipe with a debounced flow indicator.

use crate::common::Point;
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{Instrumented, Reading};
use tl_controls::{BoolSignal, HoldTimer};

/// Pipe between two pieces of equipment.
///
/// Pipes carry no volume. They exist so a diagram can draw the route and
/// show whether liquid moved through the link recently. The indicator is a
/// hold timer: any tick with flow re-arms it, and it drops only after the
/// hold has elapsed without flow.
#[derive(Debug, Clone)]
pub struct Pipe {
    name: String,
    waypoints: Vec<Point>,
    hold: HoldTimer,
    flowing: BoolSignal,
}

impl Pipe {
    /// Create an idle pipe.
    ///
    /// # Errors
    /// Returns error if fewer than two waypoints are given or `hold_s` is
    /// not positive.
    pub fn new(name: impl Into<String>, waypoints: Vec<Point>, hold_s: f64) -> ComponentResult<Self> {
        if waypoints.len() < 2 {
            return Err(ComponentError::InvalidArg {
                what: "pipe needs at least two waypoints",
            });
        }
        Ok(Self {
            name: name.into(),
            waypoints,
            hold: HoldTimer::new(hold_s)?,
            flowing: BoolSignal::new(false),
        })
    }

    /// Feed this tick's flow condition. Returns the debounced indicator.
    pub fn update_flow(&mut self, moved: bool, dt: f64) -> bool {
        let flowing = self.hold.update(moved, dt);
        self.flowing.set(flowing);
        flowing
    }

    pub fn is_flowing(&self) -> bool {
        self.flowing.get()
    }

    /// Seconds left on the hold timer.
    pub fn hold_remaining(&self) -> f64 {
        self.hold.remaining()
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Clear the indicator and its timer.
    pub fn reset(&mut self) {
        self.hold.reset();
        self.flowing.set(false);
    }
}

impl Instrumented for Pipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn readings(&self) -> Vec<Reading> {
        vec![("FLOW", self.flowing.into())]
    }
}
